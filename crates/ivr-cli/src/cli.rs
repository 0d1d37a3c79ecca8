//! CLI argument definitions for the intake pipeline.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "ivr-intake",
    version,
    about = "Intake form extraction, normalization, and template mapping",
    long_about = "Extract structured fields from manufacturer order forms, normalize \n\
                  heterogeneous insurance data onto one canonical vocabulary, merge \n\
                  multi-source records, and project them onto verification templates."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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

    /// Allow field-level (PHI) values in trace logs. Off by default;
    /// redacted placeholders are logged instead.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Load the pattern registry from a JSON file instead of the built-in
    /// tables.
    #[arg(long = "registry", value_name = "PATH", global = true)]
    pub registry: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Extract manufacturer, fields, and product lines from order-form text.
    Extract(ExtractArgs),

    /// Normalize one raw source record onto the canonical vocabulary.
    Normalize(NormalizeArgs),

    /// Merge normalized records, keeping the best value per field.
    Merge(MergeArgs),

    /// Project a canonical record onto a target template.
    Map(MapArgs),

    /// Check required-field completeness for a manufacturer/template pair.
    Completeness(CompletenessArgs),

    /// List registered manufacturers and templates.
    Registry,
}

#[derive(Parser)]
pub struct ExtractArgs {
    /// Path to the order-form text file (use - for stdin).
    #[arg(value_name = "TEXT_FILE")]
    pub input: PathBuf,

    /// Emit the full extraction result as JSON instead of a summary table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct NormalizeArgs {
    /// Path to the raw record JSON file (use - for stdin).
    #[arg(value_name = "RECORD_JSON")]
    pub input: PathBuf,

    /// Origin of the record (insurance_card, esign_submission, quick_intake,
    /// eligibility_response, manual_entry, unknown).
    #[arg(long = "source", value_name = "SOURCE")]
    pub source: String,

    /// Print the normalization report alongside the record.
    #[arg(long = "report")]
    pub report: bool,
}

#[derive(Parser)]
pub struct MergeArgs {
    /// Input JSON files, in priority order. Each file is either a normalized
    /// record or a `{source_tag: raw_record}` map normalized on the fly.
    #[arg(value_name = "RECORD_JSON", required = true)]
    pub inputs: Vec<PathBuf>,
}

#[derive(Parser)]
pub struct MapArgs {
    /// Path to the canonical record JSON file (use - for stdin).
    #[arg(value_name = "RECORD_JSON")]
    pub input: PathBuf,

    /// Target template name (esign_ivr, coverage_record, quick_intake).
    #[arg(long = "template", default_value = "esign_ivr")]
    pub template: String,
}

#[derive(Parser)]
pub struct CompletenessArgs {
    /// Path to the canonical record JSON file (use - for stdin).
    #[arg(value_name = "RECORD_JSON")]
    pub input: PathBuf,

    /// Manufacturer whose required-field table applies.
    #[arg(long = "manufacturer", value_name = "NAME")]
    pub manufacturer: String,

    /// Target template name.
    #[arg(long = "template", default_value = "esign_ivr")]
    pub template: String,

    /// Emit the report as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
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
