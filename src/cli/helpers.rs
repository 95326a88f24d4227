//! Shared helper functions for CLI commands
//!
//! Number formatting and string utilities used by several command modules.

use std::path::Path;

use miette::Result;

use crate::entities::shipment::Shipment;

/// Group the integer part with thousands separators, fixed decimals
///
/// ```
/// use lce::cli::helpers::format_thousands;
/// assert_eq!(format_thousands(1234567.891, 2), "1,234,567.89");
/// ```
pub fn format_thousands(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let raw = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match raw.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (raw.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && raw.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

/// Birr amount, e.g. "ETB 1,234.50"
pub fn format_etb(value: f64) -> String {
    format!("ETB {}", format_thousands(value, 2))
}

/// Dollar amount, e.g. "$12,000.00"
pub fn format_usd(value: f64) -> String {
    if value < 0.0 {
        format!("-${}", format_thousands(-value, 2))
    } else {
        format!("${}", format_thousands(value, 2))
    }
}

/// Landed factor with two decimals, or "N/A" when undefined (zero FOB)
pub fn format_factor(value: f64) -> String {
    if value.is_finite() {
        format!("{:.2}x", value)
    } else {
        "N/A".to_string()
    }
}

/// Load a shipment and apply `key=value` overrides in order
pub fn load_with_overrides(path: &Path, overrides: &[String]) -> Result<Shipment> {
    let mut shipment = Shipment::load(path)?;
    for assignment in overrides {
        shipment
            .inputs
            .apply_override(assignment)
            .map_err(|e| miette::miette!("Invalid --set '{}': {}", assignment, e))?;
        tracing::info!(assignment = assignment.as_str(), "applied override");
    }
    Ok(shipment)
}
