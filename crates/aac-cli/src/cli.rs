//! CLI argument definitions.

use std::path::PathBuf;

use aac_model::{BucketMode, Measure};
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "aac",
    version,
    about = "Alcohol availability analytics over the quarterly supply series",
    long_about = "Load the quarterly alcohol-available-for-consumption table once and\n\
                  run trend, crossover, composition, seasonal and unit-check views over it.\n\
                  Every view can also be exported as a long-format CSV."
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

    /// JSON file with default view options (smoothing window, bucket mode, measure).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Explicit log level (overrides -v/-q flags and RUST_LOG).
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
    /// Load the table and list its groups, series and years.
    Summary(SourceArgs),

    /// Trend lines of a group's series.
    Trend(TrendArgs),

    /// Points where two series of a group cross.
    Crossover(CrossoverArgs),

    /// Per-year or per-decade totals and shares of a group's series.
    Composition(CompositionArgs),

    /// Year by quarter heatmap of one series.
    Seasonal(SeasonalArgs),

    /// Ratio of a litres series to its proof-litres counterpart.
    #[command(name = "unit-check")]
    UnitCheck(UnitCheckArgs),
}

#[derive(Args)]
pub struct SourceArgs {
    /// Path to the source CSV extract.
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Also write the view as CSV to this path.
    #[arg(long = "export", value_name = "PATH")]
    pub export: Option<PathBuf>,
}

#[derive(Args)]
pub struct GroupArgs {
    /// Group key, e.g. `litres-of-beverage`.
    #[arg(long = "group", value_name = "KEY")]
    pub group: String,

    /// Restrict to these series keys (default: every series in the group).
    #[arg(long = "series", value_name = "KEY", value_delimiter = ',')]
    pub series: Vec<String>,

    /// Only pivot records with these units (required when a series mixes bases).
    #[arg(long = "units", value_name = "UNITS")]
    pub units: Option<String>,
}

#[derive(Args)]
pub struct TrendArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub group: GroupArgs,

    /// What to plot (default from config, else volume).
    #[arg(long = "measure", value_enum)]
    pub measure: Option<MeasureArg>,

    /// Trailing moving-average window; 0 or 1 disables smoothing.
    #[arg(long = "window", value_name = "N")]
    pub window: Option<usize>,

    #[command(flatten)]
    pub export: ExportArgs,
}

#[derive(Args)]
pub struct CrossoverArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub group: GroupArgs,

    /// Smoothing window applied before detection.
    #[arg(long = "window", value_name = "N")]
    pub window: Option<usize>,

    #[command(flatten)]
    pub export: ExportArgs,
}

#[derive(Args)]
pub struct CompositionArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub group: GroupArgs,

    /// Bucket size (default from config, else decade).
    #[arg(long = "bucket", value_enum)]
    pub bucket: Option<BucketArg>,

    #[command(flatten)]
    pub export: ExportArgs,
}

#[derive(Args)]
pub struct SeasonalArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Series key.
    #[arg(long = "series", value_name = "KEY")]
    pub series: String,

    /// Only count records of this group.
    #[arg(long = "group", value_name = "KEY")]
    pub group: Option<String>,

    /// Only count records with these units.
    #[arg(long = "units", value_name = "UNITS")]
    pub units: Option<String>,

    #[command(flatten)]
    pub export: ExportArgs,
}

#[derive(Args)]
pub struct UnitCheckArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Series key of the litres side.
    #[arg(long = "litres", value_name = "KEY")]
    pub litres: String,

    /// Series key of the proof-litres side.
    #[arg(long = "proof", value_name = "KEY")]
    pub proof: String,

    /// Units label of the litres side, when both sides share a series key.
    #[arg(long = "litres-units", value_name = "UNITS")]
    pub litres_units: Option<String>,

    /// Units label of the proof-litres side.
    #[arg(long = "proof-units", value_name = "UNITS")]
    pub proof_units: Option<String>,

    /// Only count records of this group on both sides.
    #[arg(long = "group", value_name = "KEY")]
    pub group: Option<String>,

    #[command(flatten)]
    pub export: ExportArgs,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum MeasureArg {
    Volume,
    Share,
}

impl From<MeasureArg> for Measure {
    fn from(value: MeasureArg) -> Self {
        match value {
            MeasureArg::Volume => Measure::Volume,
            MeasureArg::Share => Measure::Share,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum BucketArg {
    Year,
    Decade,
}

impl From<BucketArg> for BucketMode {
    fn from(value: BucketArg) -> Self {
        match value {
            BucketArg::Year => BucketMode::Year,
            BucketArg::Decade => BucketMode::Decade,
        }
    }
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
