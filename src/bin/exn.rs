#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;

use exn::cli::args::{CliArgs, OutputFormat};
use exn::cli::driver;
use exn::cli::reporter::{Reporter, render_json};

const EXIT_SUCCESS: i32 = 0;
const EXIT_DIAGNOSTICS_REPORTED: i32 = 1;

fn main() -> Result<()> {
    // Zero cost unless EXN_LOG or RUST_LOG is set (see src/tracing_config.rs).
    exn::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    let run = driver::run(&args, &cwd)?;

    if args.fixes {
        let json =
            serde_json::to_string_pretty(&run.fixes).context("failed to serialize edits")?;
        println!("{json}");
        std::process::exit(EXIT_SUCCESS);
    }

    match args.format {
        OutputFormat::Json => println!("{}", render_json(&run.diagnostics)?),
        OutputFormat::Text => {
            let color = args
                .pretty
                .unwrap_or_else(|| std::io::stdout().is_terminal());
            let mut reporter = Reporter::new(color).with_sources(run.sources);
            if !run.diagnostics.is_empty() {
                println!("{}\n", reporter.render(&run.diagnostics));
                println!("{}", reporter.format_summary(&run.diagnostics));
            }
        }
    }
    if run.cancelled {
        eprintln!("exn: check cancelled before completion");
    }

    let status = if run.diagnostics.is_empty() {
        EXIT_SUCCESS
    } else {
        EXIT_DIAGNOSTICS_REPORTED
    };
    std::process::exit(status);
}
