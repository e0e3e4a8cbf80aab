//! Checked-exception analysis.
//!
//! For every executable member the checker collects the points where an
//! exception type can escape ([`escape::EscapeWalker`]) and compares them with
//! what the member documents. Static initialization must not throw at all.
//! Overrides and interface implementations must not document exceptions their
//! base contract does not allow.
//!
//! Entry points:
//! - [`ProgramChecker`] - checks a whole bound program, in parallel
//! - [`CheckerState`] - checks one member or type
//! - [`fixer`] - documentation edits for undocumented-exception diagnostics

pub mod context;
mod contract_checker;
pub mod documented;
mod error_reporter;
pub mod escape;
pub mod fixer;
mod initializer_checker;
mod member_checker;
pub mod program;
pub mod state;

pub use context::{CheckerContext, CheckerOptions, DEFAULT_IGNORED_EXCEPTIONS};
pub use escape::{EscapePoint, EscapeWalker};
pub use program::{CancellationToken, CheckResult, ProgramChecker};
pub use state::CheckerState;
