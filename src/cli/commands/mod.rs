//! CLI command implementations

pub mod calc;
pub mod completions;
pub mod config;
pub mod correlate;
pub mod new;
pub mod params;
pub mod validate;
