//! Documentation comment parsing.
//!
//! The host hands over the raw comment text (`/// <summary>...`) and its source
//! offset. Line markers are blanked in place so byte offsets inside the XML
//! fragment map straight back to the source, then the fragment is read with
//! `quick-xml`. Only top-level `<exception cref="...">` elements are collected.

use exn_common::Span;
use exn_common::limits::MAX_DOCUMENTED_EXCEPTIONS;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::ops::Range;
use tracing::{trace, warn};

const ROOT_OPEN: &str = "<doc>";
const ROOT_CLOSE: &str = "</doc>";
const EXCEPTION_TAG: &[u8] = b"exception";
const CREF_ATTRIBUTE: &str = "cref";

/// One `<exception cref="...">` entry of a documentation comment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentedException {
    /// Attribute text as written, e.g. `T:System.FormatException`.
    pub cref: String,
    /// Span of the attribute value in the source file.
    pub cref_span: Span,
    /// Span of the whole element in the source file.
    pub element_span: Span,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Documentation {
    /// Source span of the comment, trailing whitespace excluded.
    pub comment_span: Option<Span>,
    pub exceptions: Vec<DocumentedException>,
}

impl Documentation {
    /// Parse a documentation comment that starts at byte `offset` of its file.
    ///
    /// Malformed XML produces a documentation value with no exception entries.
    #[must_use]
    pub fn parse(text: &str, offset: u32) -> Self {
        let comment_span = Span::at(offset, text.trim_end().len() as u32);
        let exceptions = match parse_exception_elements(text) {
            Some(entries) => entries
                .into_iter()
                .map(|entry| entry.into_documented(offset))
                .collect(),
            None => {
                trace!(offset, "malformed documentation comment");
                Vec::new()
            }
        };
        Self {
            comment_span: Some(comment_span),
            exceptions,
        }
    }

    #[must_use]
    pub fn has_comment(&self) -> bool {
        self.comment_span.is_some()
    }

    /// Whether `cref` already appears verbatim (or with a `T:` prefix).
    #[must_use]
    pub fn documents(&self, cref: &str) -> bool {
        self.exceptions
            .iter()
            .any(|entry| strip_type_prefix(&entry.cref) == strip_type_prefix(cref))
    }
}

/// Strip the `T:` member-kind prefix of a documentation reference.
#[must_use]
pub fn strip_type_prefix(cref: &str) -> &str {
    cref.strip_prefix("T:").unwrap_or(cref).trim()
}

/// Entry with ranges relative to the comment text.
struct RawEntry {
    cref: String,
    cref_range: Range<usize>,
    element_range: Range<usize>,
}

impl RawEntry {
    fn into_documented(self, offset: u32) -> DocumentedException {
        let to_span =
            |range: Range<usize>| Span::new(range.start as u32, range.end as u32).offset_by(offset);
        DocumentedException {
            cref: self.cref,
            cref_span: to_span(self.cref_range),
            element_span: to_span(self.element_range),
        }
    }
}

/// Replace `///` line markers with spaces, keeping every byte offset.
fn blank_line_markers(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        let indent = line.len() - line.trim_start().len();
        let (head, rest) = line.split_at(indent);
        out.push_str(head);
        match rest.strip_prefix("///") {
            Some(after) => {
                out.push_str("   ");
                out.push_str(after);
            }
            None => out.push_str(rest),
        }
    }
    out
}

/// Collect the top-level exception elements, or `None` when the XML is malformed.
fn parse_exception_elements(text: &str) -> Option<Vec<RawEntry>> {
    let body = blank_line_markers(text);
    let wrapped = format!("{ROOT_OPEN}{body}{ROOT_CLOSE}");
    let base = ROOT_OPEN.len();
    let to_text_range = |range: Range<usize>| {
        range.start.saturating_sub(base)..range.end.saturating_sub(base).min(text.len())
    };

    let mut reader = Reader::from_str(&wrapped);
    let mut entries = Vec::new();
    let mut depth = 0usize;
    // Open top-level exception element: (cref, cref range, element start).
    let mut open: Option<(Option<(String, Range<usize>)>, usize)> = None;

    loop {
        let before = reader.buffer_position() as usize;
        let event = reader.read_event();
        let after = reader.buffer_position() as usize;
        match event {
            Ok(Event::Start(ref e)) => {
                if depth == 1 && e.local_name().as_ref() == EXCEPTION_TAG {
                    open = Some((read_cref(e, &wrapped[before..after], before), before));
                }
                depth += 1;
            }
            Ok(Event::Empty(ref e)) => {
                if depth == 1
                    && e.local_name().as_ref() == EXCEPTION_TAG
                    && let Some((cref, cref_range)) = read_cref(e, &wrapped[before..after], before)
                {
                    entries.push(RawEntry {
                        cref,
                        cref_range: to_text_range(cref_range),
                        element_range: to_text_range(before..after),
                    });
                }
            }
            Ok(Event::End(_)) => {
                depth = depth.checked_sub(1)?;
                if depth == 1
                    && let Some((cref, start)) = open.take()
                    && let Some((cref, cref_range)) = cref
                {
                    entries.push(RawEntry {
                        cref,
                        cref_range: to_text_range(cref_range),
                        element_range: to_text_range(start..after),
                    });
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(_) => return None,
        }
    }

    if depth != 0 {
        return None;
    }
    if entries.len() > MAX_DOCUMENTED_EXCEPTIONS {
        warn!(
            count = entries.len(),
            "documentation comment lists too many exceptions, truncating"
        );
        entries.truncate(MAX_DOCUMENTED_EXCEPTIONS);
    }
    Some(entries)
}

/// Read the `cref` attribute of a start tag. `raw_tag` is the tag's source
/// text, which starts at byte `tag_start` of the wrapped fragment.
fn read_cref(
    element: &BytesStart<'_>,
    raw_tag: &str,
    tag_start: usize,
) -> Option<(String, Range<usize>)> {
    let value = element
        .attributes()
        .filter_map(Result::ok)
        .find(|attr| attr.key.as_ref() == CREF_ATTRIBUTE.as_bytes())?
        .unescape_value()
        .ok()?
        .into_owned();
    let range = attribute_value_range(raw_tag, CREF_ATTRIBUTE)?;
    Some((value, tag_start + range.start..tag_start + range.end))
}

/// Byte range of the quoted value of attribute `name` inside a raw start tag.
fn attribute_value_range(raw_tag: &str, name: &str) -> Option<Range<usize>> {
    let bytes = raw_tag.as_bytes();
    let mut search_from = 0;
    while let Some(found) = raw_tag[search_from..].find(name) {
        let name_start = search_from + found;
        let name_end = name_start + name.len();
        search_from = name_end;

        let preceded_by_space = name_start > 0 && bytes[name_start - 1].is_ascii_whitespace();
        if !preceded_by_space {
            continue;
        }
        let mut pos = name_end;
        while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }
        if bytes.get(pos) != Some(&b'=') {
            continue;
        }
        pos += 1;
        while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }
        let quote = *bytes.get(pos)?;
        if quote != b'"' && quote != b'\'' {
            continue;
        }
        let value_start = pos + 1;
        let value_len = raw_tag[value_start..].find(quote as char)?;
        return Some(value_start..value_start + value_len);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_line_markers_preserves_offsets() {
        let text = "/// <a/>\n    /// b";
        let blanked = blank_line_markers(text);
        assert_eq!(blanked.len(), text.len());
        assert_eq!(blanked, "    <a/>\n        b");
    }

    #[test]
    fn test_attribute_value_range_skips_lookalike_names() {
        let tag = r#"<exception xcref="no" cref = 'T:Foo'>"#;
        let range = attribute_value_range(tag, "cref").unwrap();
        assert_eq!(&tag[range], "T:Foo");
    }

    #[test]
    fn test_strip_type_prefix() {
        assert_eq!(strip_type_prefix("T:System.FormatException"), "System.FormatException");
        assert_eq!(strip_type_prefix("FormatException"), "FormatException");
    }
}
