//! CLI command definitions for confight
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

pub mod formats;
pub mod show;

use crate::logging::LogLevel;
use clap::{Parser, Subcommand};
use show::ShowArgs;

/// Inspect layered application configuration
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Logging level: debug, info, warning, error or critical
    #[arg(short, long, default_value = "error", value_name = "LEVEL", global = true)]
    pub verbose: LogLevel,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the merged configuration of an application
    Show(ShowArgs),

    /// List supported config formats and their file extensions
    Formats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_defaults_to_error() {
        let cli = Cli::try_parse_from(["confight", "show", "myapp"]).unwrap();
        assert_eq!(cli.verbose, LogLevel::Error);
        assert!(matches!(cli.command, Some(Command::Show(_))));
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::try_parse_from(["confight", "show", "myapp", "-v", "debug"]).unwrap();
        assert_eq!(cli.verbose, LogLevel::Debug);
    }

    #[test]
    fn test_invalid_level_rejected() {
        assert!(Cli::try_parse_from(["confight", "--verbose", "loud"]).is_err());
    }

    #[test]
    fn test_formats_subcommand() {
        let cli = Cli::try_parse_from(["confight", "formats"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Formats)));
    }

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::try_parse_from(["confight"]).unwrap();
        assert!(cli.command.is_none());
    }
}
