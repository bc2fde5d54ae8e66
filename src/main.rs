//! confight command-line tool
//!
//! Prints the merged configuration an application would see.

use anyhow::Result;
use clap::{CommandFactory, Parser};
use confight::cli::{Cli, Command, formats, show};
use confight::format::FormatRegistry;
use confight::logging::{self, LogLevel};
use std::process::ExitCode;
use tracing::debug;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let level = cli.verbose;

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if level == LogLevel::Debug {
                eprintln!("Error: {err:?}");
            } else {
                eprintln!("Error: {err:#}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    logging::init(cli.verbose)?;
    debug!(level = %cli.verbose, "Logging initialized");

    match cli.command {
        Some(Command::Show(args)) => {
            let stdout = std::io::stdout();
            show::run(&args, &mut stdout.lock())?;
        }
        Some(Command::Formats) => {
            let stdout = std::io::stdout();
            formats::run(&FormatRegistry::builtin(), &mut stdout.lock())?;
        }
        None => {
            Cli::command().write_help(&mut std::io::stderr())?;
        }
    }
    Ok(())
}
