//! Output formatting utilities

use clap::ValueEnum;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::core::Config;

/// Determine the effective output format, honoring the configured default
///
/// An explicit `--format` always wins; `auto` falls back to the config value
/// and stays `auto` (styled text) when none is set or it is unrecognized.
pub fn effective_format(format: OutputFormat, config: &Config) -> OutputFormat {
    match format {
        OutputFormat::Auto => config
            .default_format
            .as_deref()
            .and_then(|name| OutputFormat::from_str(name, true).ok())
            .unwrap_or(OutputFormat::Auto),
        other => other,
    }
}

/// Print a value as YAML or JSON. Returns false for the other formats.
pub fn emit_structured<T: Serialize>(value: &T, format: OutputFormat) -> Result<bool> {
    match format {
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(value).into_diagnostic()?);
            Ok(true)
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(value).into_diagnostic()?);
            Ok(true)
        }
        _ => Ok(false),
    }
}

/// Print `key<TAB>value` lines
pub fn emit_tsv<'a>(rows: impl IntoIterator<Item = (&'a str, String)>) {
    for (key, value) in rows {
        println!("{}\t{}", key, value);
    }
}
