//! Load a program model, bind it and run the checker.

use anyhow::{Context, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info_span};

use exn_binder::model::ProgramModel;
use exn_binder::BinderState;
use exn_checker::{CancellationToken, ProgramChecker};
use exn_common::diagnostics::Diagnostic;

use crate::cli::args::CliArgs;
use crate::cli::config::{ExnConfig, ResolvedOptions, find_config, load_config, resolve_options};

#[derive(Debug, Clone)]
pub struct CheckRun {
    pub diagnostics: Vec<Diagnostic>,
    pub fixes: Vec<SuggestedFix>,
    /// File name to source text, for rendering snippets.
    pub sources: FxHashMap<String, String>,
    pub cancelled: bool,
}

/// A documentation edit addressed by file name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedFix {
    pub file: String,
    pub start: u32,
    pub end: u32,
    pub new_text: String,
}

pub fn load_model(path: &Path) -> Result<ProgramModel> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read program model: {}", path.display()))?;
    parse_model(&source)
        .with_context(|| format!("failed to parse program model: {}", path.display()))
}

/// Parse a JSON program model. Operation bodies may nest arbitrarily deep, so
/// the parser's recursion limit is lifted and the stack grows on demand.
pub fn parse_model(source: &str) -> serde_json::Result<ProgramModel> {
    let mut json = serde_json::Deserializer::from_str(source);
    json.disable_recursion_limit();
    let model = ProgramModel::deserialize(serde_stacker::Deserializer::new(&mut json))?;
    json.end()?;
    Ok(model)
}

pub fn run(args: &CliArgs, cwd: &Path) -> Result<CheckRun> {
    let input = resolve_path(cwd, &args.input);
    let config_path = match &args.config {
        Some(path) => Some(resolve_path(cwd, path)),
        None => find_config(&input),
    };
    let config = match &config_path {
        Some(path) => load_config(path)?,
        None => ExnConfig::default(),
    };
    debug!(input = %input.display(), config = ?config_path, "resolved inputs");

    let options = resolve_options(args, &config);
    let model = load_model(&input)?;
    let newline = args.fixes.then(|| args.new_line.as_str());
    check_model(&model, options, newline, &CancellationToken::new())
}

/// Bind and check `model`. With `fix_newline`, documentation edits are
/// suggested as well.
pub fn check_model(
    model: &ProgramModel,
    options: ResolvedOptions,
    fix_newline: Option<&str>,
    token: &CancellationToken,
) -> Result<CheckRun> {
    let _span = info_span!("check_model", files = model.files.len(), types = model.types.len())
        .entered();
    let binder =
        BinderState::bind(model, options.bind).context("failed to bind program model")?;

    let checker = ProgramChecker::new(&binder, options.checker);
    let result = checker.check_program(token);
    let fixes = match fix_newline {
        Some(newline) => checker
            .suggest_documentation_fixes(newline)
            .into_iter()
            .map(|edit| SuggestedFix {
                file: binder.file_name(edit.file).to_string(),
                start: edit.start,
                end: edit.end,
                new_text: edit.new_text,
            })
            .collect(),
        None => Vec::new(),
    };

    let sources = binder
        .files()
        .iter()
        .filter_map(|file| Some((file.name.clone(), file.text.clone()?)))
        .collect();

    Ok(CheckRun {
        diagnostics: result.diagnostics,
        fixes,
        sources,
        cancelled: result.cancelled,
    })
}

fn resolve_path(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}
