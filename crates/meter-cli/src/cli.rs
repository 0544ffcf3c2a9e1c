//! CLI argument definitions for the meter loader.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "meter",
    version,
    about = "Load, clean and aggregate meter reading datasets",
    long_about = "Load semicolon-separated meter readings from one or more directories.\n\n\
                  Readings flagged by the data loggers are dropped, values are checked\n\
                  against the column catalog, and batches can be averaged per hour."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

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
    /// Load one or more directories into a single dataset.
    Load(LoadArgs),

    /// List the columns of the catalog.
    Catalog(CatalogArgs),

    /// Convert logger unix timestamps to date-time strings.
    Timestamp(TimestampArgs),
}

#[derive(Parser)]
pub struct LoadArgs {
    /// Directories holding the record sources, assembled in this order.
    #[arg(value_name = "DIR", required = true)]
    pub dirs: Vec<PathBuf>,

    /// Columns to load (comma-separated or repeated).
    #[arg(
        short = 'c',
        long = "columns",
        value_name = "NAME",
        value_delimiter = ',',
        required = true
    )]
    pub columns: Vec<String>,

    /// Average each record source per (hour, date).
    #[arg(long = "hourly")]
    pub hourly: bool,

    /// Process record sources in file-name order instead of directory order.
    #[arg(long = "sorted")]
    pub sorted: bool,

    /// Warn and skip unreadable record sources instead of failing.
    #[arg(long = "skip-unreadable")]
    pub skip_unreadable: bool,

    /// TOML column catalog (default: built-in catalog).
    #[arg(long = "catalog", value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Field separator of the record sources and of the output.
    #[arg(long = "delimiter", value_name = "CHAR", default_value_t = ';')]
    pub delimiter: char,

    /// Record source extension, without the dot.
    #[arg(long = "extension", value_name = "EXT", default_value = "csv")]
    pub extension: String,

    /// Write the dataset to this file (default: stdout).
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Hide the progress bar.
    #[arg(long = "no-progress")]
    pub no_progress: bool,
}

#[derive(Parser)]
pub struct CatalogArgs {
    /// TOML column catalog (default: built-in catalog).
    #[arg(long = "catalog", value_name = "PATH")]
    pub catalog: Option<PathBuf>,
}

#[derive(Parser)]
pub struct TimestampArgs {
    /// Unix timestamps in seconds.
    #[arg(value_name = "UNIX", required = true, allow_negative_numbers = true)]
    pub values: Vec<f64>,

    /// Offset in seconds (default: the fixed logger offset).
    #[arg(long = "offset", value_name = "SECS", allow_negative_numbers = true)]
    pub offset: Option<i64>,
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
