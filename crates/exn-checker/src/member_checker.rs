//! Member body rules: methods, accessors, instance and static constructors.

use exn_binder::{ConstructorInitializer, Symbol, SymbolId};
use exn_common::FileId;
use exn_common::diagnostics::diagnostic_messages;
use exn_solver::TypeSet;
use tracing::debug;

use crate::escape::EscapePoint;
use crate::state::CheckerState;

impl<'a> CheckerState<'a> {
    /// Check the body of a method, accessor or declared constructor.
    pub fn check_member_body(&mut self, symbol_id: SymbolId) {
        let binder = self.ctx.binder;
        let Some(symbol) = binder.get_symbol(symbol_id) else {
            return;
        };
        let Some(file) = symbol.file else {
            return;
        };
        if !symbol.is_callable() || symbol.is_implicit() {
            return;
        }
        debug!(member = %binder.display_name(symbol_id), "checking member body");

        if symbol.is_constructor() && symbol.is_static {
            self.check_static_constructor(symbol, file);
        } else {
            self.check_documented_body(symbol_id, symbol, file);
        }
    }

    /// Static constructors may neither document nor let escape any exception.
    fn check_static_constructor(&mut self, symbol: &'a Symbol, file: FileId) {
        for entry in &symbol.documentation.exceptions {
            self.error_at(
                file,
                entry.element_span,
                &diagnostic_messages::STATIC_CONSTRUCTORS_SHOULD_NOT_THROW,
                &[],
            );
        }
        let Some(body) = symbol.body else {
            return;
        };
        for point in self.collect_escapes(body, self.ctx.ignored.clone()) {
            self.report_escape(
                file,
                &point,
                &diagnostic_messages::STATIC_CONSTRUCTORS_SHOULD_NOT_THROW,
                &diagnostic_messages::EXCEPTION_THROWN_BY_SHOULD_BE_CAUGHT,
            );
        }
    }

    fn check_documented_body(&mut self, symbol_id: SymbolId, symbol: &'a Symbol, file: FileId) {
        let binder = self.ctx.binder;
        let handled = self
            .ctx
            .ignored
            .add_all(binder, self.documented.resolved(symbol_id));

        if let Some(body) = symbol.body {
            for point in self.collect_escapes(body, handled.clone()) {
                self.report_escape(
                    file,
                    &point,
                    &diagnostic_messages::EXCEPTION_SHOULD_BE_DOCUMENTED,
                    &diagnostic_messages::EXCEPTION_THROWN_BY_SHOULD_BE_DOCUMENTED,
                );
            }
        }

        if !symbol.is_static
            && symbol.constructor_initializer() == Some(ConstructorInitializer::None)
        {
            self.check_implicit_base_constructor_call(symbol, file, &handled);
        }
    }

    /// A class constructor without `: this(...)`/`: base(...)` calls the
    /// parameterless base constructor; its exceptions escape at the
    /// constructor's name.
    fn check_implicit_base_constructor_call(
        &mut self,
        symbol: &'a Symbol,
        file: FileId,
        handled: &TypeSet,
    ) {
        let binder = self.ctx.binder;
        let Some(declaring) = binder.get_type(symbol.declaring_type) else {
            return;
        };
        if !declaring.is_class() {
            return;
        }
        let Some(base_ctor) = declaring
            .base
            .and_then(|base| binder.parameterless_instance_constructor(base))
        else {
            return;
        };
        for exception in self.documented.resolved(base_ctor) {
            if handled.contains(binder, exception) {
                continue;
            }
            let point = EscapePoint {
                span: symbol.name_span,
                exception,
                origin: Some(base_ctor),
            };
            self.report_escape(
                file,
                &point,
                &diagnostic_messages::EXCEPTION_SHOULD_BE_DOCUMENTED,
                &diagnostic_messages::EXCEPTION_THROWN_BY_SHOULD_BE_DOCUMENTED,
            );
        }
    }
}
