//! CLI argument definitions for the DVF explorer.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use dvf_model::{ChartId, Department, Year};

#[derive(Parser)]
#[command(
    name = "dvf",
    version,
    about = "Explore French real-estate transactions (DVF) by department and year",
    long_about = "Explore French real-estate transactions (DVF, Demandes de valeurs foncières).\n\n\
                  Datasets are fetched per department and year from the geo-dvf export\n\
                  (or a local mirror) and cached for the session."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Settings file (default: settings.toml in the platform config folder).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the department catalogue.
    Departments,

    /// Open a session, apply the selections and print the resulting view.
    Explore(ExploreArgs),

    /// Interactive session reading commands from stdin or a script.
    Session(SessionArgs),

    /// Show the department-level summary dataset.
    Summary(SummaryArgs),
}

#[derive(Args)]
pub struct ExploreArgs {
    /// Department code (06, 2A, 971).
    #[arg(long = "department", short = 'd')]
    pub department: Option<Department>,

    /// Year (2023 or "Vendus en 2023").
    #[arg(long = "year", short = 'y')]
    pub year: Option<Year>,

    /// Property type (defaults to the first available type).
    #[arg(long = "property-type", short = 't')]
    pub property_type: Option<String>,

    /// Restrict to one postcode.
    #[arg(long = "postcode", short = 'p')]
    pub postcode: Option<String>,

    /// Show absolute prices instead of price per m².
    #[arg(long = "absolute-price")]
    pub absolute_price: bool,

    /// Charts to pass to the renderer (repeatable; default: all).
    #[arg(long = "chart", value_name = "CHART")]
    pub charts: Vec<ChartId>,

    /// Print the view as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct SessionArgs {
    /// Read commands from this file instead of stdin.
    #[arg(long = "script", value_name = "FILE")]
    pub script: Option<PathBuf>,

    /// Print views as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct SummaryArgs {
    /// Show the summary rows of one department.
    #[arg(long = "department", short = 'd')]
    pub department: Option<Department>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
