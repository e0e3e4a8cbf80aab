//! Documentation fixes for undocumented-exception diagnostics.
//!
//! The fix appends `<exception>` lines to a member's documentation comment,
//! or writes a new comment above the declaration when there is none.

use exn_binder::{BinderState, SymbolId};
use exn_common::FileId;
use exn_common::diagnostics::{Diagnostic, diagnostic_codes};
use serde::Serialize;

/// Diagnostics the documentation fix applies to.
pub const FIXABLE_DIAGNOSTIC_CODES: &[u32] = &[
    diagnostic_codes::EXCEPTION_SHOULD_BE_DOCUMENTED,
    diagnostic_codes::EXCEPTION_THROWN_BY_SHOULD_BE_DOCUMENTED,
];

#[must_use]
pub fn is_fixable(diag: &Diagnostic) -> bool {
    FIXABLE_DIAGNOSTIC_CODES.contains(&diag.code)
}

/// A single text replacement in one file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TextEdit {
    pub file: FileId,
    pub start: u32,
    pub end: u32,
    pub new_text: String,
}

impl TextEdit {
    /// `text` with this edit applied. Out-of-range edits leave it unchanged.
    #[must_use]
    pub fn apply(&self, text: &str) -> String {
        let (start, end) = (self.start as usize, self.end as usize);
        match (text.get(..start), text.get(end..)) {
            (Some(before), Some(after)) if start <= end => {
                format!("{before}{}{after}", self.new_text)
            }
            _ => text.to_string(),
        }
    }
}

/// Exception names carried by the fixable diagnostics in `diagnostics`,
/// distinct, in first-seen order.
pub fn exception_names<'d>(diagnostics: impl IntoIterator<Item = &'d Diagnostic>) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for diag in diagnostics {
        if !is_fixable(diag) {
            continue;
        }
        if let Some(name) = diag.exception_metadata_name()
            && !names.iter().any(|seen| seen == name)
        {
            names.push(name.to_string());
        }
    }
    names
}

/// Edit documenting `names` on `symbol`, or `None` when the member has no
/// declaration position, its file has no text, or every name is already
/// documented.
#[must_use]
pub fn document_exceptions(
    binder: &BinderState,
    symbol: SymbolId,
    names: &[String],
    newline: &str,
) -> Option<TextEdit> {
    let info = binder.get_symbol(symbol)?;
    let file = info.file?;
    let text = binder.file(file)?.text.as_deref()?;
    let declaration = info.declaration_start? as usize;
    let before_declaration = text.get(..declaration)?;

    let missing: Vec<&String> = names
        .iter()
        .filter(|name| !is_already_documented(binder, symbol, name))
        .collect();
    if missing.is_empty() {
        return None;
    }

    let line_start = before_declaration.rfind('\n').map_or(0, |i| i + 1);
    let indent: String = before_declaration[line_start..]
        .chars()
        .take_while(|c| c.is_whitespace())
        .collect();
    let line = |name: &str| format!("{indent}/// <exception cref=\"{name}\"></exception>");

    let edit = match info.documentation.comment_span {
        Some(comment) => TextEdit {
            file,
            start: comment.end,
            end: comment.end,
            new_text: missing
                .iter()
                .map(|name| format!("{newline}{}", line(name)))
                .collect(),
        },
        None => TextEdit {
            file,
            start: line_start as u32,
            end: line_start as u32,
            new_text: missing
                .iter()
                .map(|name| format!("{}{newline}", line(name)))
                .collect(),
        },
    };
    Some(edit)
}

fn is_already_documented(binder: &BinderState, symbol: SymbolId, name: &str) -> bool {
    let Some(info) = binder.get_symbol(symbol) else {
        return false;
    };
    if info.documentation.documents(name) {
        return true;
    }
    let Some(wanted) = binder.resolve_cref(name) else {
        return false;
    };
    info.documentation
        .exceptions
        .iter()
        .any(|entry| binder.resolve_cref(&entry.cref) == Some(wanted))
}
