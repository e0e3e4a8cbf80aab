//! Common types and utilities for the exn checked-exception analyzer.
//!
//! This crate provides foundational types used across all exn crates:
//! - Source spans and file ids (`Span`, `FileId`)
//! - Line/column mapping for rendering (`LineMap`, `Position`)
//! - Analyzer limits and thresholds
//! - Diagnostic values and the diagnostic message table

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::{FileId, Span};

// Position/line mapping for diagnostic rendering
pub mod position;
pub use position::{LineMap, Position};

// Centralized limits and thresholds
pub mod limits;

// Diagnostic values, codes and message templates
pub mod diagnostics;
