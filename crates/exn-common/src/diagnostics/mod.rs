//! Diagnostic types and message lookup for the exception checker.
//!
//! Message data lives in `data.rs`. Every diagnostic the checker produces is a
//! plain value; rendering and reporting are left to the caller.

use indexmap::IndexMap;
use serde::Serialize;

mod data;
pub use data::{DIAGNOSTIC_MESSAGES, diagnostic_codes, diagnostic_messages};

/// Prefix rendered in front of numeric diagnostic codes (`LM3001`).
pub const DIAGNOSTIC_CODE_PREFIX: &str = "LM";

/// Category shared by every checked-exception diagnostic.
pub const CHECKED_EXCEPTIONS_CATEGORY: &str = "CheckedExceptions";

/// Property key under which undocumented-exception diagnostics carry the
/// exception's simple type name, for the documentation fixer.
pub const EXCEPTION_METADATA_NAME: &str = "ExceptionMetadataName";

// =============================================================================
// Diagnostic Types
// =============================================================================

/// Diagnostic category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DiagnosticCategory {
    Warning = 0,
    Error = 1,
    Suggestion = 2,
    Message = 3,
}

impl DiagnosticCategory {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            DiagnosticCategory::Warning => "warning",
            DiagnosticCategory::Error => "error",
            DiagnosticCategory::Suggestion => "suggestion",
            DiagnosticCategory::Message => "message",
        }
    }
}

/// Related information for a diagnostic (e.g., the base member a contract comes from).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DiagnosticRelatedInformation {
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
    pub category: DiagnosticCategory,
    pub code: u32,
}

/// A checker diagnostic with optional related information and structured properties.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
    pub category: DiagnosticCategory,
    pub code: u32,
    /// Related information spans (e.g., where an overridden member is declared)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub related_information: Vec<DiagnosticRelatedInformation>,
    /// Structured payload for fix providers, keyed by fixed property names.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, String>,
}

impl Diagnostic {
    /// Create a new warning diagnostic.
    #[must_use]
    pub fn warning(file: String, start: u32, length: u32, message: String, code: u32) -> Self {
        Self {
            file,
            start,
            length,
            message_text: message,
            category: DiagnosticCategory::Warning,
            code,
            related_information: Vec::new(),
            properties: IndexMap::new(),
        }
    }

    /// Create a diagnostic from a message definition and its arguments.
    #[must_use]
    pub fn from_message(
        message: &DiagnosticMessage,
        file: String,
        start: u32,
        length: u32,
        args: &[&str],
    ) -> Self {
        Self {
            file,
            start,
            length,
            message_text: format_message(message.message, args),
            category: message.category,
            code: message.code,
            related_information: Vec::new(),
            properties: IndexMap::new(),
        }
    }

    /// Add related information to this diagnostic.
    #[must_use]
    pub fn with_related(mut self, file: String, start: u32, length: u32, message: String) -> Self {
        self.related_information.push(DiagnosticRelatedInformation {
            file,
            start,
            length,
            message_text: message,
            category: DiagnosticCategory::Message,
            code: 0,
        });
        self
    }

    /// Attach a structured property.
    #[must_use]
    pub fn with_property(mut self, key: &str, value: impl Into<String>) -> Self {
        self.properties.insert(key.to_string(), value.into());
        self
    }

    /// The exception type name recorded for the documentation fixer, if any.
    #[must_use]
    pub fn exception_metadata_name(&self) -> Option<&str> {
        self.properties
            .get(EXCEPTION_METADATA_NAME)
            .map(String::as_str)
    }

    /// Rendered diagnostic id, e.g. `LM3001`.
    #[must_use]
    pub fn id(&self) -> String {
        format_code(self.code)
    }
}

/// Render a numeric code with the diagnostic prefix.
#[must_use]
pub fn format_code(code: u32) -> String {
    format!("{DIAGNOSTIC_CODE_PREFIX}{code}")
}

/// Format a diagnostic message by replacing {0}, {1}, etc. with arguments.
#[must_use]
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

/// A diagnostic message definition with code, category, and message template.
#[derive(Clone, Copy, Debug)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub title: &'static str,
    pub message: &'static str,
}

/// Look up a diagnostic message definition by code.
#[must_use]
pub fn get_diagnostic_message(code: u32) -> Option<&'static DiagnosticMessage> {
    DIAGNOSTIC_MESSAGES.iter().find(|m| m.code == code)
}

/// Get the message template for a diagnostic code.
///
/// Returns the template string with `{0}`, `{1}`, etc. placeholders.
/// Use `format_message()` to fill in the placeholders.
#[must_use]
pub fn get_message_template(code: u32) -> Option<&'static str> {
    get_diagnostic_message(code).map(|m| m.message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_message_replaces_positional_args() {
        let text = format_message(
            diagnostic_messages::EXCEPTION_THROWN_BY_SHOULD_BE_DOCUMENTED.message,
            &["FormatException", "Foo.Bar()"],
        );
        assert_eq!(
            text,
            "Exception 'FormatException', thrown by 'Foo.Bar()', should be documented."
        );
    }

    #[test]
    fn test_codes_are_unique() {
        let mut codes: Vec<u32> = DIAGNOSTIC_MESSAGES.iter().map(|m| m.code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), DIAGNOSTIC_MESSAGES.len());
    }

    #[test]
    fn test_metadata_property_round_trips_through_json() {
        let diag = Diagnostic::from_message(
            &diagnostic_messages::EXCEPTION_SHOULD_BE_DOCUMENTED,
            "a.cs".to_string(),
            4,
            5,
            &["FormatException"],
        )
        .with_property(EXCEPTION_METADATA_NAME, "FormatException");

        assert_eq!(diag.id(), "LM3001");
        assert_eq!(diag.exception_metadata_name(), Some("FormatException"));

        let json = serde_json::to_value(&diag).unwrap();
        assert_eq!(json["properties"]["ExceptionMetadataName"], "FormatException");
        assert!(json.get("related_information").is_none());
    }
}
