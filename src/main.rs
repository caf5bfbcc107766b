//! elfparser command line tool.
//!
//! Usage:
//!   elfparser <input.elf> [--header] [--sec] [--sym] [--srclist]
//!             [--search <SYMBOL>] [--s19 <FILE>] [--c <FILE>] [--json]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use elfparser::config::ParserConfig;
use elfparser::logging;
use elfparser::runner;
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    let cli = cli::Cli::parse();

    if cli.log_json {
        logging::init_tracing_json(cli.log_level());
    } else {
        logging::init_tracing(cli.log_level());
    }

    let mut config = match &cli.config {
        Some(path) => ParserConfig::from_json_file(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => ParserConfig::default(),
    };
    if cli.strtab.is_some() {
        config.image.symbol_strtab = cli.strtab;
    }

    let request = cli.request();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let report = runner::run(&request, &config, &mut out)
        .with_context(|| format!("processing {}", request.input.display()))?;

    Ok(if report.valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
