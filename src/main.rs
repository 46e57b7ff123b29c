mod cli;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use dusage::engine::render;
use dusage::fs::RealFileSystem;
use dusage::paths::{self, OsFamily};
use dusage::{AnalyzeOptions, Analyzer, UsageResult};

use crate::cli::{Cli, Format};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let family = OsFamily::current();
    let drive = paths::current_drive();
    let raw_path = cli
        .path
        .clone()
        .unwrap_or_else(|| paths::default_root(family, drive.as_deref()));
    let root = PathBuf::from(paths::normalize_path(&raw_path, family, drive.as_deref()));

    let analyzer = Analyzer::with_options(
        RealFileSystem,
        AnalyzeOptions {
            max_concurrency: cli.max_concurrency,
            collect_warnings: cli.warnings,
        },
    );

    let outcome = analyzer.analyze(&root, cli.clamped_depth()).await;

    let mut stdout = io::stdout().lock();
    match outcome {
        Ok(result) => {
            write_output(&mut stdout, &cli, &result)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            match cli.format {
                Format::Json => {
                    let body = ErrorBody {
                        error: err.to_string(),
                    };
                    write_json(&mut stdout, &cli, &body)?;
                }
                Format::Tree => eprintln!("dusage: {err}"),
            }
            Ok(ExitCode::from(1))
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

fn write_output<W: Write>(writer: &mut W, cli: &Cli, result: &UsageResult) -> Result<()> {
    match cli.format {
        Format::Json => write_json(writer, cli, result),
        Format::Tree => Ok(render::write_result(writer, result)?),
    }
}

fn write_json<W: Write, T: Serialize>(writer: &mut W, cli: &Cli, value: &T) -> Result<()> {
    if cli.pretty {
        serde_json::to_writer_pretty(&mut *writer, value)?;
    } else {
        serde_json::to_writer(&mut *writer, value)?;
    }
    writeln!(writer)?;
    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "dusage=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
