//! make-error-info - Generate static error-info tables
//!
//! Reads one or more `*.error.in` definition files and writes the C table
//! fragment each of them names through its `OUTPUT=` directive.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use error_info::{Mode, generate_all};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "make-error-info")]
#[command(version)]
#[command(about = "Generate static error-info tables from *.error.in definition files")]
struct Cli {
    /// Definition files to process, in order
    #[arg(required = true, value_name = "FILES")]
    files: Vec<PathBuf>,

    /// Check that generated files are up to date without writing them
    #[arg(short, long)]
    check: bool,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

fn init_logging(quiet: bool) {
    let default_filter = if quiet {
        "error"
    } else {
        "make_error_info=info,error_info=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.quiet);

    let mode = if cli.check { Mode::Check } else { Mode::Write };
    let summary = generate_all(&cli.files, mode)?;

    match mode {
        Mode::Write => {
            info!(files = summary.written.len(), "Generated error tables");
        }
        Mode::Check if !summary.is_clean() => {
            for path in &summary.stale {
                error!(output = %path.display(), "Out of date; rerun make-error-info");
            }
            return Ok(ExitCode::FAILURE);
        }
        Mode::Check => {
            info!(files = summary.up_to_date.len(), "Error tables are up to date");
        }
    }

    Ok(ExitCode::SUCCESS)
}
