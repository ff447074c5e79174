//! Command-line interface for shackbook.
//!
//! This module provides the CLI structure; the handlers live in
//! `crate::handler`.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    ClockCommand, ExportCommand, ExportFormat, GraylineCommand, InfoArgs, LocaleCommand, LogCommand,
    PlacesCommand, SearchArgs,
};

/// shackbook - station tools for the amateur radio operator
///
/// UTC clock, grayline, a contest logbook with Cabrillo/ADIF export and
/// POTA/WWFF/SOTA place search.
#[derive(Debug, Parser)]
#[command(name = "shackbook")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE", default_value = "config.toml")]
    pub config: PathBuf,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the UTC clock
    Clock(ClockCommand),

    /// Compute the day/night terminator
    Grayline(GraylineCommand),

    /// Log contacts and manage the contest form
    #[command(subcommand)]
    Log(LogCommand),

    /// Export the log as Cabrillo or ADIF
    Export(ExportCommand),

    /// Search POTA, WWFF and SOTA places
    #[command(subcommand)]
    Places(PlacesCommand),

    /// Interface language
    #[command(subcommand)]
    Locale(LocaleCommand),
}

impl Cli {
    /// Log level after applying `-v` flags to the configured level
    #[must_use]
    pub fn log_level<'a>(&self, configured: &'a str) -> &'a str {
        match self.verbose {
            0 => configured,
            1 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use shack_common::Program;

    #[test]
    fn test_cli_debug_assert() {
        Cli::command().debug_assert();
        assert_eq!(Cli::command().get_name(), "shackbook");
    }

    #[test]
    fn test_log_level_from_verbosity() {
        let cli = Cli::try_parse_from(["shackbook", "clock", "--once"]).unwrap();
        assert_eq!(cli.log_level("warn"), "warn");
        let cli = Cli::try_parse_from(["shackbook", "-vv", "clock"]).unwrap();
        assert_eq!(cli.log_level("warn"), "trace");
    }

    #[test]
    fn test_parse_log_add() {
        let cli = Cli::try_parse_from([
            "shackbook", "log", "add", "oh2abc", "--rcvd", "012 HE", "--time", "12:34",
        ])
        .unwrap();
        match cli.command {
            Command::Log(LogCommand::Add { call, rcvd, time, date, .. }) => {
                assert_eq!(call, "oh2abc");
                assert_eq!(rcvd, "012 HE");
                assert_eq!(time.as_deref(), Some("12:34"));
                assert!(date.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_places_search() {
        let cli = Cli::try_parse_from([
            "shackbook", "--config", "other.toml", "places", "search", "oh3", "--program", "sota",
        ])
        .unwrap();
        assert_eq!(cli.config, PathBuf::from("other.toml"));
        match cli.command {
            Command::Places(PlacesCommand::Search(args)) => {
                assert_eq!(args.query, "oh3");
                assert_eq!(
                    args.program,
                    shack_core::module::places::ProgramFilter::Only(Program::Sota)
                );
                assert!(args.grid.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_export_format() {
        let cli = Cli::try_parse_from(["shackbook", "export", "adif"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Export(ExportCommand { format: ExportFormat::Adif, .. })
        ));
        assert!(Cli::try_parse_from(["shackbook", "export", "csv"]).is_err());
    }
}
