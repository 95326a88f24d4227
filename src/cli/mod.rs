//! CLI module - argument parsing and command dispatch

pub mod args;
pub mod commands;
pub mod filters;
pub mod helpers;
pub mod output;
pub mod viz;

pub use args::{Cli, Commands, GlobalOpts, OutputFormat};
pub use filters::ParamTypeFilter;

use miette::Result;

/// Run a parsed command line
pub fn dispatch(cli: Cli) -> Result<()> {
    let global = cli.global;
    match cli.command {
        Commands::New(args) => commands::new::run(args),
        Commands::Calc(args) => commands::calc::run(args, &global),
        Commands::Correlate(args) => commands::correlate::run(args, &global),
        Commands::Params(args) => commands::params::run(args, &global),
        Commands::Validate(args) => commands::validate::run(args),
        Commands::Config(cmd) => commands::config::run(cmd, &global),
        Commands::Completions(args) => commands::completions::run(args),
    }
}
