//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "scoring",
    version,
    about = "Detect country/indicator columns and score African indicators",
    long_about = "Detect country and indicator columns in a CSV or JSON dataset, then \n\
                  normalize confirmed indicator columns to 0-100 scores for every row \n\
                  whose country resolves to one of the 54 African countries."
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

    /// Allow row-level values such as country names in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// TOML file overriding thresholds (fuzzy_threshold, sample_rows, ...).
    #[arg(long = "options", value_name = "TOML", global = true)]
    pub options: Option<PathBuf>,

    /// Replacement country table (columns: code,african,names).
    #[arg(long = "countries", value_name = "CSV", global = true)]
    pub countries: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Rank candidate country and indicator columns.
    Detect(DetectArgs),

    /// Score confirmed indicator columns for African rows.
    Process(ProcessArgs),

    /// Resolve free-text country names.
    Resolve(ResolveArgs),

    /// List the country table.
    Countries(CountriesArgs),
}

#[derive(Args)]
pub struct DetectArgs {
    /// Input dataset (.csv or .json).
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Print per-column scores to stderr.
    #[arg(long = "explain")]
    pub explain: bool,
}

#[derive(Args)]
pub struct ProcessArgs {
    /// Input dataset (.csv or .json).
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// JSON configuration file, or `-` for stdin.
    #[arg(
        long = "config",
        value_name = "JSON_FILE",
        required_unless_present = "config_json",
        conflicts_with = "config_json"
    )]
    pub config: Option<PathBuf>,

    /// JSON configuration given inline.
    #[arg(long = "config-json", value_name = "TEXT")]
    pub config_json: Option<String>,

    /// Print row counts to stderr.
    #[arg(long = "summary")]
    pub summary: bool,
}

#[derive(Args)]
pub struct ResolveArgs {
    /// Country names to resolve.
    #[arg(value_name = "TEXT", required = true)]
    pub texts: Vec<String>,
}

#[derive(Args)]
pub struct CountriesArgs {
    /// Include non-African countries.
    #[arg(long = "all")]
    pub all: bool,
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
