//! Shared helpers for checker tests: source snippets with span lookup and
//! one-call binding/checking.
#![allow(dead_code)]

use exn_binder::model::{MemberModel, ProgramModel};
use exn_binder::{BindOptions, BinderState, SymbolId};
use exn_checker::{CancellationToken, CheckerOptions, ProgramChecker};
use exn_common::Span;
use exn_common::diagnostics::Diagnostic;

pub const FILE_NAME: &str = "test.cs";

/// Source text used to compute spans for hand-built models.
pub struct Source {
    pub text: String,
}

impl Source {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }

    /// Span of the `nth` (0-based) occurrence of `needle`.
    pub fn span_nth(&self, needle: &str, nth: usize) -> Span {
        let start = self
            .text
            .match_indices(needle)
            .nth(nth)
            .map(|(start, _)| start)
            .unwrap_or_else(|| panic!("'{needle}' occurrence {nth} not in source"));
        Span::at(start as u32, needle.len() as u32)
    }

    pub fn span(&self, needle: &str) -> Span {
        self.span_nth(needle, 0)
    }

    pub fn offset(&self, needle: &str) -> u32 {
        self.span(needle).start
    }

    /// Attach the documentation comment `comment` (a verbatim substring of
    /// the source) to `member`.
    pub fn documented(&self, member: MemberModel, comment: &str) -> MemberModel {
        member.documented(comment, self.offset(comment))
    }

    pub fn slice(&self, diag: &Diagnostic) -> &str {
        let start = diag.start as usize;
        &self.text[start..start + diag.length as usize]
    }
}

pub fn bind(model: &ProgramModel) -> BinderState {
    BinderState::bind(model, BindOptions::default()).expect("model should bind")
}

pub fn check_with(binder: &BinderState, options: CheckerOptions) -> Vec<Diagnostic> {
    let result = ProgramChecker::new(binder, options).check_program(&CancellationToken::new());
    assert!(!result.cancelled);
    result.diagnostics
}

pub fn check(model: &ProgramModel) -> Vec<Diagnostic> {
    check_with(&bind(model), CheckerOptions::default())
}

pub fn codes(diagnostics: &[Diagnostic]) -> Vec<u32> {
    diagnostics.iter().map(|d| d.code).collect()
}

pub fn symbol(binder: &BinderState, type_name: &str, member: &str) -> SymbolId {
    let ty = binder
        .lookup_type(type_name)
        .unwrap_or_else(|| panic!("type {type_name}"));
    binder
        .get_type(ty)
        .expect("type info")
        .members
        .iter()
        .copied()
        .find(|&id| binder.get_symbol(id).is_some_and(|s| s.name == member))
        .unwrap_or_else(|| panic!("member {type_name}.{member}"))
}
