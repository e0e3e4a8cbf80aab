use anyhow::{Context, Result};
use colored::Colorize;
use rustc_hash::FxHashMap;
use std::path::Path;

use exn_common::LineMap;
use exn_common::diagnostics::{
    Diagnostic, DiagnosticCategory, DiagnosticRelatedInformation, format_code,
};

pub struct Reporter {
    color: bool,
    sources: FxHashMap<String, String>,
    line_maps: FxHashMap<String, LineMap>,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter {
            color,
            sources: FxHashMap::default(),
            line_maps: FxHashMap::default(),
        }
    }

    /// Use in-memory source texts; files not listed are read from disk.
    pub fn with_sources(mut self, sources: FxHashMap<String, String>) -> Self {
        self.sources.extend(sources);
        self
    }

    pub fn render(&mut self, diagnostics: &[Diagnostic]) -> String {
        let mut out = String::new();
        for (index, diagnostic) in diagnostics.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            out.push_str(&self.format_diagnostic(diagnostic));
        }
        out
    }

    pub fn format_diagnostic(&mut self, diagnostic: &Diagnostic) -> String {
        let location = self
            .format_location(&diagnostic.file, diagnostic.start)
            .unwrap_or_else(|| {
                if diagnostic.file.is_empty() {
                    "<unknown>".to_string()
                } else {
                    diagnostic.file.clone()
                }
            });
        let category = self.format_category(diagnostic.category);
        let code = self.format_code(diagnostic.code);

        let mut output = format!("{location} - {category} {code}: {}", diagnostic.message_text);
        if let Some(snippet) =
            self.format_snippet(&diagnostic.file, diagnostic.start, diagnostic.length)
        {
            output.push_str(&snippet);
        }

        for related in &diagnostic.related_information {
            output.push('\n');
            output.push_str(&self.format_related(related));
            if let Some(snippet) = self.format_snippet(&related.file, related.start, related.length)
            {
                output.push_str(&snippet);
            }
        }

        output
    }

    /// Summary line, e.g. `Found 2 warnings in 1 file.`
    pub fn format_summary(&self, diagnostics: &[Diagnostic]) -> String {
        let count = diagnostics.len();
        let mut files: Vec<&str> = diagnostics.iter().map(|d| d.file.as_str()).collect();
        files.sort_unstable();
        files.dedup();
        let warnings = if count == 1 { "warning" } else { "warnings" };
        let file_label = if files.len() == 1 { "file" } else { "files" };
        format!("Found {count} {warnings} in {} {file_label}.", files.len())
    }

    /// The source line under the span with a `~` underline.
    ///   4       throw new FormatException();
    ///           ~~~~~
    fn format_snippet(&mut self, file: &str, start: u32, length: u32) -> Option<String> {
        if file.is_empty() || length == 0 {
            return None;
        }

        let (line_num, column) = self.position_for(file, start)?;
        let source = self.sources.get(file)?;
        let line_text = source.lines().nth((line_num - 1) as usize)?;
        let line_text = line_text.strip_suffix('\r').unwrap_or(line_text);

        let span_start = (column - 1) as usize;
        let mut underline = String::new();
        for (i, ch) in line_text.chars().enumerate() {
            let tilde_or_space = if i < span_start {
                ' '
            } else if i < span_start + length as usize {
                '~'
            } else {
                break;
            };
            if ch == '\t' {
                underline.extend(std::iter::repeat_n(tilde_or_space, 4));
            } else {
                underline.push(tilde_or_space);
            }
        }
        if !underline.contains('~') {
            underline.push('~');
        }

        let underline = if self.color {
            underline.red().to_string()
        } else {
            underline
        };
        Some(format!("\n  {line_num:>3}   {line_text}\n        {underline}"))
    }

    fn format_related(&mut self, related: &DiagnosticRelatedInformation) -> String {
        let location = self
            .format_location(&related.file, related.start)
            .unwrap_or_else(|| related.file.clone());
        let prefix = if self.color {
            "  Related".dimmed().to_string()
        } else {
            "  Related".to_string()
        };

        format!("{prefix}: {location} - {}", related.message_text)
    }

    fn format_location(&mut self, file: &str, offset: u32) -> Option<String> {
        if file.is_empty() {
            return None;
        }

        let (line, column) = self.position_for(file, offset)?;
        Some(format!("{file}:{line}:{column}"))
    }

    fn position_for(&mut self, file: &str, offset: u32) -> Option<(u32, u32)> {
        self.ensure_source(file)?;
        if !self.line_maps.contains_key(file) {
            let map = LineMap::build(self.sources.get(file)?);
            self.line_maps.insert(file.to_string(), map);
        }

        let position = self.line_maps.get(file)?.offset_to_position(offset);
        Some((position.line + 1, position.character + 1))
    }

    fn ensure_source(&mut self, file: &str) -> Option<()> {
        if !self.sources.contains_key(file) {
            let contents = std::fs::read_to_string(Path::new(file)).ok()?;
            self.sources.insert(file.to_string(), contents);
        }
        Some(())
    }

    fn format_category(&self, category: DiagnosticCategory) -> String {
        let label = category.as_str();
        if !self.color {
            return label.to_string();
        }

        match category {
            DiagnosticCategory::Error => label.red().bold().to_string(),
            DiagnosticCategory::Warning => label.yellow().bold().to_string(),
            DiagnosticCategory::Suggestion => label.blue().bold().to_string(),
            DiagnosticCategory::Message => label.cyan().bold().to_string(),
        }
    }

    fn format_code(&self, code: u32) -> String {
        let label = format_code(code);
        if self.color {
            label.bright_blue().to_string()
        } else {
            label
        }
    }
}

/// Diagnostics as a pretty-printed JSON array.
pub fn render_json(diagnostics: &[Diagnostic]) -> Result<String> {
    serde_json::to_string_pretty(diagnostics).context("failed to serialize diagnostics")
}
