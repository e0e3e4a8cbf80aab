//! Exception contract compatibility for overrides and interface implementations.

use exn_binder::{SymbolId, SymbolKind, TypeId};
use exn_common::FileId;
use exn_common::diagnostics::{DiagnosticMessage, diagnostic_messages};
use exn_solver::TypeHierarchy;
use tracing::debug;

use crate::state::CheckerState;

impl<'a> CheckerState<'a> {
    /// Check a method, property or event against the member it overrides.
    pub fn check_overridden_member(&mut self, symbol_id: SymbolId) {
        let binder = self.ctx.binder;
        let Some(symbol) = binder.get_symbol(symbol_id) else {
            return;
        };
        if !matches!(
            symbol.kind,
            SymbolKind::Method | SymbolKind::Property | SymbolKind::Event
        ) {
            return;
        }
        let (Some(file), Some(overridden)) = (symbol.file, symbol.overridden) else {
            return;
        };
        self.check_contract(
            symbol_id,
            overridden,
            file,
            &diagnostic_messages::OVERRIDE_EXCEPTION_NOT_COMPATIBLE,
        );
    }

    /// Check the implementations of every member of `ty`'s direct interfaces.
    pub fn check_interface_implementations(&mut self, ty: TypeId) {
        let binder = self.ctx.binder;
        let Some(info) = binder.get_type(ty) else {
            return;
        };
        if !info.is_from_source() || info.is_interface() {
            return;
        }
        for &interface in &info.interfaces {
            let Some(interface_info) = binder.get_type(interface) else {
                continue;
            };
            for &member in &interface_info.members {
                let Some(contract) = binder.get_symbol(member) else {
                    continue;
                };
                // Accessors are covered through their property or event.
                if contract.is_accessor() || contract.is_constructor() || contract.is_static {
                    continue;
                }
                let Some(implementation) =
                    binder.find_implementation_for_interface_member(ty, member)
                else {
                    debug!(
                        member = %binder.display_name(member),
                        "no implementation found"
                    );
                    continue;
                };
                let Some(file) = binder.get_symbol(implementation).and_then(|s| s.file) else {
                    continue;
                };
                self.check_contract(
                    implementation,
                    member,
                    file,
                    &diagnostic_messages::INTERFACE_EXCEPTION_NOT_COMPATIBLE,
                );
            }
        }
    }

    /// Every resolvable exception `candidate` documents must be a subtype of
    /// some exception documented by `contract`.
    fn check_contract(
        &mut self,
        candidate: SymbolId,
        contract: SymbolId,
        file: FileId,
        message: &DiagnosticMessage,
    ) {
        let binder = self.ctx.binder;
        let Some(symbol) = binder.get_symbol(candidate) else {
            return;
        };
        let allowed = self.documented.resolved(contract);
        for entry in &symbol.documentation.exceptions {
            let Some(documented) = binder.resolve_cref(&entry.cref) else {
                continue;
            };
            if allowed
                .iter()
                .any(|&allowed| binder.is_subtype_of(documented, allowed))
            {
                continue;
            }
            self.error_incompatible_exception(file, entry, contract, message);
        }
    }
}
