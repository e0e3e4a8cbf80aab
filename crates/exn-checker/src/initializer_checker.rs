//! Field and property initializer rules.
//!
//! Static initializers run during type initialization and must not throw.
//! Instance initializers run inside every initializing constructor, so each
//! of those constructors has to document what the initializer can throw.

use exn_binder::{SymbolId, SymbolKind, TypeId};
use exn_common::diagnostics::diagnostic_messages;
use exn_solver::TypeSet;
use smallvec::SmallVec;
use tracing::debug;

use crate::state::CheckerState;

impl<'a> CheckerState<'a> {
    pub fn check_member_initializer(&mut self, symbol_id: SymbolId) {
        let binder = self.ctx.binder;
        let Some(symbol) = binder.get_symbol(symbol_id) else {
            return;
        };
        if !matches!(symbol.kind, SymbolKind::Field | SymbolKind::Property) {
            return;
        }
        let (Some(file), Some(root)) = (symbol.file, symbol.initializer) else {
            return;
        };
        debug!(member = %binder.display_name(symbol_id), "checking initializer");

        let escapes = self.collect_escapes(root, self.ctx.ignored.clone());
        if escapes.is_empty() {
            return;
        }

        if symbol.is_static {
            for point in &escapes {
                self.error_at(
                    file,
                    point.span,
                    &diagnostic_messages::STATIC_MEMBER_INITIALIZERS_SHOULD_NOT_THROW,
                    &[],
                );
            }
            return;
        }

        let mut covered_by_all = TypeSet::Universal;
        for ctor in binder.initialization_constructors(symbol.declaring_type) {
            let documented = self.documented.documented_set(ctor);
            let mut reported: SmallVec<[TypeId; 4]> = SmallVec::new();
            for point in &escapes {
                if documented.contains(binder, point.exception)
                    || reported.contains(&point.exception)
                {
                    continue;
                }
                reported.push(point.exception);
                self.error_initializer_exception_undocumented(ctor, point, symbol);
            }
            covered_by_all = TypeSet::intersect(binder, &covered_by_all, &documented);
        }

        for point in &escapes {
            if !covered_by_all.contains(binder, point.exception) {
                self.report_escape(
                    file,
                    point,
                    &diagnostic_messages::EXCEPTION_SHOULD_BE_DOCUMENTED_BY_ALL_CONSTRUCTORS,
                    &diagnostic_messages::EXCEPTION_THROWN_BY_SHOULD_BE_DOCUMENTED_BY_ALL_CONSTRUCTORS,
                );
            }
        }
    }
}
