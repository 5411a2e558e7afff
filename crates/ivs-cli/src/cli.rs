//! CLI argument definitions for the inventory validator.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use ivs_rules::DEFAULT_RULES_FILE;

#[derive(Parser)]
#[command(
    name = "ivs",
    version,
    about = "Inventory Validation - Check supplier diamond inventory files",
    long_about = "Check supplier diamond inventory files against a rule table.\n\n\
                  Reconciles supplier headers, checks mandatory fields, numeric values,\n\
                  accepted values, media links and price consistency."
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
    /// Validate a supplier inventory table.
    Validate(ValidateArgs),

    /// List the canonical fields of a rule table.
    Rules(RulesArgs),
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Supplier inventory file (.csv, .xlsx, .xls, .xlsm, .ods).
    #[arg(value_name = "SUPPLIER_TABLE")]
    pub table: PathBuf,

    /// Rule table: a workbook with Columns and Values sheets, or a directory
    /// with Columns.csv and Values.csv.
    #[arg(long = "rules", value_name = "PATH", default_value = DEFAULT_RULES_FILE)]
    pub rules: PathBuf,

    /// TOML file overriding check and probe settings.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Supplier name used in the email summary.
    #[arg(long = "supplier-name", value_name = "NAME")]
    pub supplier_name: Option<String>,

    /// Write the issue report workbook and email summary into this directory.
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Write all issues as JSON to this file.
    #[arg(long = "json", value_name = "PATH")]
    pub json: Option<PathBuf>,

    /// Do not probe media links.
    #[arg(long = "skip-urls")]
    pub skip_urls: bool,

    /// Sample issues printed per stage.
    #[arg(long = "sample", value_name = "N", default_value_t = 5)]
    pub sample: usize,
}

#[derive(Parser)]
pub struct RulesArgs {
    /// Rule table: a workbook or a directory of CSV sheets.
    #[arg(long = "rules", value_name = "PATH", default_value = DEFAULT_RULES_FILE)]
    pub rules: PathBuf,
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
