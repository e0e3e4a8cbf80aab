//! Diagnostic construction (`error_*` for emission, `report_*` for escapes).

use exn_binder::{DocumentedException, Symbol, SymbolId};
use exn_common::diagnostics::{
    Diagnostic, DiagnosticMessage, EXCEPTION_METADATA_NAME, diagnostic_codes, diagnostic_messages,
};
use exn_common::{FileId, Span};

use crate::escape::EscapePoint;
use crate::state::CheckerState;

/// Diagnostics the documentation fixer can act on carry the exception name.
fn carries_exception_metadata(code: u32) -> bool {
    matches!(
        code,
        diagnostic_codes::EXCEPTION_SHOULD_BE_DOCUMENTED
            | diagnostic_codes::EXCEPTION_THROWN_BY_SHOULD_BE_DOCUMENTED
            | diagnostic_codes::EXCEPTION_THROWN_BY_INITIALIZER_SHOULD_BE_DOCUMENTED
            | diagnostic_codes::EXCEPTION_THROWN_BY_SHOULD_BE_DOCUMENTED_BY_ALL_CONSTRUCTORS
            | diagnostic_codes::EXCEPTION_SHOULD_BE_DOCUMENTED_BY_ALL_CONSTRUCTORS
    )
}

impl<'a> CheckerState<'a> {
    pub(crate) fn error_at(
        &mut self,
        file: FileId,
        span: Span,
        message: &DiagnosticMessage,
        args: &[&str],
    ) {
        let diag = Diagnostic::from_message(message, self.file_name(file), span.start, span.len(), args);
        self.diagnostics.push(diag);
    }

    fn push_with_metadata(&mut self, diag: Diagnostic, exception_name: &str) {
        let diag = if carries_exception_metadata(diag.code) {
            diag.with_property(EXCEPTION_METADATA_NAME, exception_name)
        } else {
            diag
        };
        self.diagnostics.push(diag);
    }

    /// Report an escape with `direct` for a throw and `via_callee` for a call
    /// or construction.
    pub(crate) fn report_escape(
        &mut self,
        file: FileId,
        point: &EscapePoint,
        direct: &DiagnosticMessage,
        via_callee: &DiagnosticMessage,
    ) {
        let binder = self.ctx.binder;
        let exception = binder.type_name(point.exception);
        let file_name = self.file_name(file);
        let diag = match point.origin {
            None => Diagnostic::from_message(
                direct,
                file_name,
                point.span.start,
                point.span.len(),
                &[exception],
            ),
            Some(callee) => {
                let callee = binder.display_name(callee);
                Diagnostic::from_message(
                    via_callee,
                    file_name,
                    point.span.start,
                    point.span.len(),
                    &[exception, callee.as_str()],
                )
            }
        };
        self.push_with_metadata(diag, exception);
    }

    /// An instance initializer escape not documented by `constructor`.
    pub(crate) fn error_initializer_exception_undocumented(
        &mut self,
        constructor: SymbolId,
        point: &EscapePoint,
        initialized: &Symbol,
    ) {
        let binder = self.ctx.binder;
        let Some(ctor) = binder.get_symbol(constructor) else {
            return;
        };
        let Some(file) = ctor.file else {
            return;
        };
        let exception = binder.type_name(point.exception);
        let diag = Diagnostic::from_message(
            &diagnostic_messages::EXCEPTION_THROWN_BY_INITIALIZER_SHOULD_BE_DOCUMENTED,
            self.file_name(file),
            ctor.name_span.start,
            ctor.name_span.len(),
            &[exception, initialized.name.as_str()],
        );
        self.push_with_metadata(diag, exception);
    }

    /// A documented exception on an override/implementation that the base
    /// contract does not allow.
    pub(crate) fn error_incompatible_exception(
        &mut self,
        file: FileId,
        entry: &DocumentedException,
        contract: SymbolId,
        message: &DiagnosticMessage,
    ) {
        let binder = self.ctx.binder;
        let contract_name = binder.display_name(contract);
        let mut diag = Diagnostic::from_message(
            message,
            self.file_name(file),
            entry.cref_span.start,
            entry.cref_span.len(),
            &[entry.cref.as_str(), contract_name.as_str()],
        );
        if let Some(base) = binder.get_symbol(contract)
            && let Some(base_file) = base.file
        {
            diag = diag.with_related(
                self.file_name(base_file),
                base.name_span.start,
                base.name_span.len(),
                format!("'{contract_name}' is declared here."),
            );
        }
        self.diagnostics.push(diag);
    }
}
