//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use cohort_cli::config::{ConfigOverrides, IdentityMode};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "cohort",
    version,
    about = "Find survey cohorts large enough to report on",
    long_about = "Explore combinations of household and respondent attributes.\n\n\
                  Every combination whose matching rows reach the sample minimum is\n\
                  reported with its size and mean child mortality rate."
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

    /// Log output format.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Append logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Enumerate combinations and write both reports.
    Explore(ExploreArgs),

    /// List the dimensions that can be explored.
    Dimensions,

    /// Print search-space sizes for the trimmed domains.
    Space(SourceArgs),
}

/// Where the data comes from and how it is trimmed.
#[derive(Args)]
pub struct SourceArgs {
    /// TOML run configuration.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Women CSV file.
    #[arg(long = "women", value_name = "CSV")]
    pub women: Option<PathBuf>,

    /// Household CSV file.
    #[arg(long = "household", value_name = "CSV")]
    pub household: Option<PathBuf>,

    /// Minimum rows per value and per reported cohort.
    #[arg(long = "sample-min", value_name = "N")]
    pub sample_min: Option<usize>,
}

#[derive(Args)]
pub struct ExploreArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Directory for the report files.
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Whether equal values in different dimensions are the same for pruning.
    #[arg(long = "identity", value_enum)]
    pub identity: Option<IdentityMode>,

    /// Skip the unconditional listing of every combination.
    #[arg(long = "skip-all-combinations")]
    pub skip_all_combinations: bool,

    /// Print the reports without writing files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

impl SourceArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            sample_min: self.sample_min,
            women_csv: self.women.clone(),
            household_csv: self.household.clone(),
            ..ConfigOverrides::default()
        }
    }
}

impl ExploreArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            output_dir: self.output_dir.clone(),
            identity: self.identity,
            ..self.source.overrides()
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
