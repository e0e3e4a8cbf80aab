//! Checker options and the read-only context shared by member checks.

use exn_binder::BinderState;
use exn_solver::TypeSet;
use tracing::debug;

/// Exception types any member may leave undocumented.
pub const DEFAULT_IGNORED_EXCEPTIONS: &[&str] = &[
    "System.OutOfMemoryException",
    "System.StackOverflowException",
    "System.Threading.ThreadAbortException",
    "System.Threading.ThreadInterruptedException",
    "System.OverflowException",
    "System.DivideByZeroException",
    "System.InvalidOperationException",
    "System.NotImplementedException",
    "System.ArgumentException",
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckerOptions {
    /// Type names treated as handled everywhere. Names that do not resolve
    /// are skipped.
    pub ignored_exceptions: Vec<String>,
}

impl Default for CheckerOptions {
    fn default() -> Self {
        Self {
            ignored_exceptions: DEFAULT_IGNORED_EXCEPTIONS
                .iter()
                .map(|name| (*name).to_string())
                .collect(),
        }
    }
}

/// Immutable state shared by every member check of one program.
#[derive(Debug)]
pub struct CheckerContext<'a> {
    pub binder: &'a BinderState,
    pub options: CheckerOptions,
    /// Resolved `ignored_exceptions`, folded into every ambient handled set.
    pub ignored: TypeSet,
}

impl<'a> CheckerContext<'a> {
    pub fn new(binder: &'a BinderState, options: CheckerOptions) -> Self {
        let resolved = options
            .ignored_exceptions
            .iter()
            .filter_map(|name| {
                let ty = binder.resolve_type_name(name);
                if ty.is_none() {
                    debug!(name = %name, "ignored exception type does not resolve");
                }
                ty
            });
        let ignored = TypeSet::empty().add_all(binder, resolved);
        Self {
            binder,
            options,
            ignored,
        }
    }
}
