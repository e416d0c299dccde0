//! Tally CLI - code size metrics and copy-paste detection.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tally::analyzers::run_analysis;
use tally::cli::Cli;
use tally::config::Config;
use tally::report::write_report;

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> tally::Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load_default(".")?,
    };
    cli.apply_to(&mut config)?;
    config.validate()?;

    let paths = cli.resolved_files(&config);
    let result = run_analysis(&paths, &config)?;

    if let Some(path) = &config.report.output {
        tracing::info!("Writing report to: {}", path.display());
    }
    write_report(config.report.kind, config.report.output.as_deref(), &result)?;
    Ok(())
}
