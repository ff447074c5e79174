//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use shack_common::Locale;
use shack_core::module::grayline::DEFAULT_RESOLUTION;
use shack_core::module::places::ProgramFilter;

/// Clock command arguments.
#[derive(Debug, Args)]
pub struct ClockCommand {
    /// Print the time once and exit
    #[arg(long)]
    pub once: bool,
}

/// Grayline command arguments.
#[derive(Debug, Args)]
pub struct GraylineCommand {
    /// Recompute every minute
    #[arg(short, long)]
    pub watch: bool,

    /// Longitude step of the terminator line, in degrees
    #[arg(short, long, default_value_t = DEFAULT_RESOLUTION)]
    pub resolution: f64,

    /// Print only the subsolar point and the day/night state at a locator
    #[arg(long, value_name = "GRID")]
    pub at: Option<String>,
}

/// Logbook commands.
#[derive(Debug, Subcommand)]
pub enum LogCommand {
    /// Log a contact with the current contest, band and mode
    Add {
        /// Callsign of the other station
        call: String,

        /// Received exchange
        #[arg(short, long, default_value = "")]
        rcvd: String,

        /// Sent exchange, for free-text contests
        #[arg(short, long)]
        sent: Option<String>,

        /// Date as YYYY-MM-DD (defaults to today, UTC)
        #[arg(long)]
        date: Option<String>,

        /// Time as HH:MM (defaults to now, UTC)
        #[arg(long)]
        time: Option<String>,

        /// Sent report (defaults to the form selection)
        #[arg(long)]
        rst_sent: Option<String>,

        /// Received report (defaults to 59)
        #[arg(long)]
        rst_rcvd: Option<String>,
    },

    /// List logged contacts
    List {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Delete a contact by its list number
    Delete {
        /// Number shown by `log list`
        number: usize,
    },

    /// Select the contest, or list contests when none is given
    Contest { id: Option<String> },

    /// Select the mode (resets the sent report)
    Mode { mode: String },

    /// Select the band
    Band { band: String },

    /// Set the sent report
    Rst { rst: String },

    /// Set the region code sent in region contests
    Region { code: String },

    /// Set the sent exchange of a free-text contest
    Exchange { text: String },

    /// Set the Cabrillo category
    Category {
        #[arg(long)]
        operator: Option<String>,
        #[arg(long)]
        band: Option<String>,
        #[arg(long)]
        mode: Option<String>,
        #[arg(long)]
        power: Option<String>,
    },

    /// Set the operator details for the Cabrillo header
    Info(InfoArgs),

    /// Show the current form and the exchange the next contact will send
    Show,
}

/// Contest info arguments.
#[derive(Debug, Args)]
pub struct InfoArgs {
    /// Operator name
    #[arg(long)]
    pub name: Option<String>,

    /// Postal address
    #[arg(long)]
    pub address: Option<String>,

    /// Soapbox text; may span several lines
    #[arg(long)]
    pub soapbox: Option<String>,
}

/// Export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Cabrillo,
    Adif,
}

/// Export command arguments.
#[derive(Debug, Args)]
pub struct ExportCommand {
    /// Output format
    #[arg(value_enum)]
    pub format: ExportFormat,

    /// Output directory (defaults to `export_dir` from the config)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Write to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,
}

/// Places commands.
#[derive(Debug, Subcommand)]
pub enum PlacesCommand {
    /// Search places by reference or name
    Search(SearchArgs),

    /// Show which sources loaded
    Status,
}

/// Places search arguments.
#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Reference or name fragment; empty lists everything
    #[arg(default_value = "")]
    pub query: String,

    /// all, pota, wwff or sota
    #[arg(short, long, default_value = "all")]
    pub program: ProgramFilter,

    /// Operator locator for bearings (defaults to `home_grid`)
    #[arg(short, long)]
    pub grid: Option<String>,

    /// Maximum number of results
    #[arg(short, long, default_value = "50")]
    pub limit: usize,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Locale commands.
#[derive(Debug, Subcommand)]
pub enum LocaleCommand {
    /// Show the current interface language
    Show,

    /// Set the interface language (en or fi)
    Set { locale: Locale },
}
