//! exn: checked-exception analysis over a host-supplied program model.
//!
//! The facade re-exports the workspace crates so embedders depend on one
//! package:
//!
//! - [`common`]: spans, line maps, diagnostics and the message table
//! - [`binder`]: program model, binder state, documentation parsing, corlib
//! - [`solver`]: subtype queries and the exception [`solver::TypeSet`]
//! - [`checker`]: escape collection, documentation policy, contracts, fixes

pub use exn_binder as binder;
pub use exn_checker as checker;
pub use exn_common as common;
pub use exn_solver as solver;

pub use exn_binder::{BindError, BindOptions, BinderState, ModelBuilder};
pub use exn_checker::{CancellationToken, CheckResult, CheckerOptions, ProgramChecker};
pub use exn_common::diagnostics::Diagnostic;

// Tracing subscriber setup for the binary (EXN_LOG / EXN_LOG_FORMAT).
pub mod tracing_config;

// Native CLI: arguments, exn.json, driver and rendering.
pub mod cli;
