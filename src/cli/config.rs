//! `exn.json` loading and merging with command-line flags.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use exn_binder::BindOptions;
use exn_checker::CheckerOptions;

use crate::cli::args::CliArgs;

pub const CONFIG_FILE_NAME: &str = "exn.json";

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExnConfig {
    #[serde(default)]
    pub ignored_exceptions: Option<Vec<String>>,
    #[serde(default)]
    pub no_lib: Option<bool>,
}

pub fn parse_config(source: &str) -> Result<ExnConfig> {
    serde_json::from_str(source).context("invalid exn.json")
}

pub fn load_config(path: &Path) -> Result<ExnConfig> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    parse_config(&source).with_context(|| format!("failed to parse config: {}", path.display()))
}

/// `exn.json` in the directory containing `input`, if present.
pub fn find_config(input: &Path) -> Option<PathBuf> {
    let candidate = input.parent()?.join(CONFIG_FILE_NAME);
    candidate.is_file().then_some(candidate)
}

/// Binding and checking options for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedOptions {
    pub bind: BindOptions,
    pub checker: CheckerOptions,
}

/// Options from the defaults, then the config file, then the flags.
pub fn resolve_options(args: &CliArgs, config: &ExnConfig) -> ResolvedOptions {
    let mut options = ResolvedOptions::default();
    if let Some(ignored) = &config.ignored_exceptions {
        options.checker.ignored_exceptions = ignored.clone();
    }
    if let Some(no_lib) = config.no_lib {
        options.bind.no_lib = no_lib;
    }
    if let Some(ignored) = &args.ignore {
        options.checker.ignored_exceptions = ignored
            .iter()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();
    }
    if args.no_lib {
        options.bind.no_lib = true;
    }
    options
}
