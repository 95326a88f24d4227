//! Command-line argument definitions

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::commands::calc::CalcArgs;
use crate::cli::commands::completions::CompletionsArgs;
use crate::cli::commands::config::ConfigCommands;
use crate::cli::commands::correlate::CorrelateArgs;
use crate::cli::commands::new::NewArgs;
use crate::cli::commands::params::ParamsArgs;
use crate::cli::commands::validate::ValidateArgs;

#[derive(Parser, Debug)]
#[command(
    name = "lce",
    version,
    about = "Landed Cost Engine - import landed-cost breakdowns, tax cascades and what-if correlation scenarios",
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options accepted by every command
#[derive(clap::Args, Debug, Clone)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new shipment file from the template
    New(NewArgs),

    /// Calculate the landed cost breakdown of a shipment
    Calc(CalcArgs),

    /// Simulate a what-if scenario and correlate two parameters
    Correlate(CorrelateArgs),

    /// List the parameters available for correlation
    Params(ParamsArgs),

    /// Validate shipment files against the schema
    Validate(ValidateArgs),

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Output format
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Styled text for terminals (or the configured default)
    #[default]
    Auto,
    /// YAML document
    Yaml,
    /// JSON document
    Json,
    /// Tab-separated key/value lines
    Tsv,
    /// Plain table without decoration
    Table,
}
