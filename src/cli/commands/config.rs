//! `lce config` command - Inspect the effective configuration

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::output::{effective_format, emit_structured};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::Config;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the merged configuration
    Show,

    /// Print the configuration files consulted, in precedence order
    Path,
}

pub fn run(cmd: ConfigCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ConfigCommands::Show => run_show(global),
        ConfigCommands::Path => run_path(),
    }
}

fn run_show(global: &GlobalOpts) -> Result<()> {
    let config = Config::load().map_err(|e| miette::miette!("{}", e))?;
    let format = match effective_format(global.format, &config) {
        OutputFormat::Json => OutputFormat::Json,
        _ => OutputFormat::Yaml,
    };
    emit_structured(&config, format)?;
    Ok(())
}

fn run_path() -> Result<()> {
    let cwd = std::env::current_dir().into_diagnostic()?;
    for path in Config::search_paths() {
        let marker = if path.exists() {
            style("✓").green()
        } else {
            style("·").dim()
        };
        let shown = path.strip_prefix(&cwd).unwrap_or(&path);
        println!("{} {}", marker, shown.display());
    }
    Ok(())
}
