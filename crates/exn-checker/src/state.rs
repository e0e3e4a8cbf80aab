//! Per-check state.
//!
//! A `CheckerState` is created for one unit of work (a member body, an
//! initializer, a contract) and owns that unit's documented-exception cache
//! and diagnostics. The checks themselves live in `member_checker`,
//! `initializer_checker` and `contract_checker`.

use exn_binder::NodeIndex;
use exn_common::FileId;
use exn_common::diagnostics::Diagnostic;
use exn_common::limits::ESCAPE_BUFFER_CAPACITY;
use exn_solver::TypeSet;
use smallvec::SmallVec;

use crate::context::CheckerContext;
use crate::documented::DocumentedExceptions;
use crate::escape::{EscapePoint, EscapeWalker};

pub type EscapeBuffer = SmallVec<[EscapePoint; ESCAPE_BUFFER_CAPACITY]>;

pub struct CheckerState<'a> {
    pub ctx: &'a CheckerContext<'a>,
    pub(crate) documented: DocumentedExceptions<'a>,
    pub diagnostics: Vec<Diagnostic>,
}

impl<'a> CheckerState<'a> {
    pub fn new(ctx: &'a CheckerContext<'a>) -> Self {
        Self {
            ctx,
            documented: DocumentedExceptions::new(ctx.binder),
            diagnostics: Vec::new(),
        }
    }

    pub fn documented(&self) -> &DocumentedExceptions<'a> {
        &self.documented
    }

    /// Lazily walk the escapes of the body rooted at `root`.
    pub fn escapes(&self, root: NodeIndex, ambient: TypeSet) -> EscapeWalker<'_> {
        EscapeWalker::new(self.ctx.binder, &self.documented, root, ambient)
    }

    pub(crate) fn collect_escapes(&self, root: NodeIndex, ambient: TypeSet) -> EscapeBuffer {
        self.escapes(root, ambient).collect()
    }

    pub(crate) fn file_name(&self, file: FileId) -> String {
        self.ctx.binder.file_name(file).to_string()
    }

    #[must_use]
    pub fn take_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
