use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the exn binary.
#[derive(Parser, Debug)]
#[command(
    name = "exn",
    version,
    about = "Checks that thrown exceptions are documented and contracts are kept"
)]
pub struct CliArgs {
    /// Program model to check (JSON).
    pub input: PathBuf,

    /// Path to an exn.json configuration file. Defaults to `exn.json` next to
    /// the input.
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Exception types that may always stay undocumented (comma separated).
    /// Replaces the configured list.
    #[arg(long, value_delimiter = ',')]
    pub ignore: Option<Vec<String>>,

    /// Do not link the default exception library.
    #[arg(long = "no-lib", alias = "noLib")]
    pub no_lib: bool,

    /// Diagnostic output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, ignore_case = true)]
    pub format: OutputFormat,

    /// Colored text output. Defaults to on when stdout is a terminal.
    #[arg(long)]
    pub pretty: Option<bool>,

    /// Print suggested documentation edits (JSON) instead of diagnostics.
    #[arg(long)]
    pub fixes: bool,

    /// Line ending used by suggested edits.
    #[arg(long = "new-line", value_enum, default_value_t = NewLine::Lf, ignore_case = true)]
    pub new_line: NewLine,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum NewLine {
    Lf,
    Crlf,
}

impl NewLine {
    pub fn as_str(self) -> &'static str {
        match self {
            NewLine::Lf => "\n",
            NewLine::Crlf => "\r\n",
        }
    }
}
