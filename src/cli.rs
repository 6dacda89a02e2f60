use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::analyzer::cfnlint::{OutputFormat, Severity};

#[derive(Parser, Debug)]
#[command(name = "cfn-tag-lint")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Check CloudFormation templates for DataClassification tags")]
#[command(long_about = "Lints CloudFormation templates (YAML or JSON) and reports every storage, warehouse or database resource that is missing a DataClassification entry in its Tags list.")]
pub struct Cli {
    /// Templates or directories to lint
    #[arg(value_name = "TEMPLATES")]
    pub templates: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Rule codes or prefixes to skip (comma separated)
    #[arg(long, value_delimiter = ',', value_name = "CODES")]
    pub ignore_checks: Vec<String>,

    /// Resource type prefix that requires a DataClassification tag (repeatable, replaces the defaults)
    #[arg(long = "taggable-prefix", value_name = "PREFIX")]
    pub taggable_prefixes: Vec<String>,

    /// Only report findings at or above this severity
    #[arg(long, value_enum)]
    pub threshold: Option<ThresholdArg>,

    /// Ignore cfn-lint suppressions in template and resource Metadata
    #[arg(long)]
    pub no_metadata_suppressions: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// List available rules and exit
    #[arg(long)]
    pub list_rules: bool,

    /// Enable verbose logging (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Pretty,
    Parseable,
    Json,
    Github,
    Junit,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Pretty => OutputFormat::Pretty,
            FormatArg::Parseable => OutputFormat::Parseable,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Github => OutputFormat::GitHub,
            FormatArg::Junit => OutputFormat::JUnit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThresholdArg {
    Informational,
    Warning,
    Error,
}

impl From<ThresholdArg> for Severity {
    fn from(arg: ThresholdArg) -> Self {
        match arg {
            ThresholdArg::Informational => Severity::Informational,
            ThresholdArg::Warning => Severity::Warning,
            ThresholdArg::Error => Severity::Error,
        }
    }
}

impl Cli {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let level = match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };

        env_logger::Builder::from_default_env()
            .filter_level(level)
            .init();
    }
}
