//! Landed cost calculator - CIF valuation and the import tax cascade
//!
//! The cascade order is fixed: each tax base includes the CIF value plus every
//! tax computed before it, except withholding which is levied on CIF alone.
//!
//! ```text
//! CIF ─▶ Duty ─▶ Excise ─▶ Sur-tax ─▶ VAT        (cascading bases)
//!  └───────────────────────────────▶ Withholding  (CIF base only)
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shipment inputs as entered by the user
///
/// Monetary inputs are USD at origin and ETB for local logistics. Rates are
/// percentages (10.0 means 10%). Nothing here is validated: negative or zero
/// values are accepted and simply propagate through the calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostInputs {
    /// Item description
    #[serde(default)]
    pub item_name: String,

    /// Harmonized System tariff code
    #[serde(default)]
    pub hs_code: String,

    /// Number of units in the shipment
    #[serde(default = "default_quantity")]
    pub quantity: f64,

    /// Unit of measure (pcs, kg, ...)
    #[serde(default = "default_unit")]
    pub unit: String,

    /// Free-on-board value of the goods (USD)
    #[serde(default)]
    pub fob_usd: f64,

    /// International freight (USD)
    #[serde(default)]
    pub freight_usd: f64,

    /// Cargo insurance (USD)
    #[serde(default)]
    pub insurance_usd: f64,

    /// ETB per USD
    #[serde(default)]
    pub exchange_rate: f64,

    /// Customs duty (%)
    #[serde(default)]
    pub duty_rate: f64,

    /// Excise tax (%)
    #[serde(default)]
    pub excise_rate: f64,

    /// Sur-tax (%)
    #[serde(default)]
    pub sur_tax_rate: f64,

    /// Value added tax (%)
    #[serde(default)]
    pub vat_rate: f64,

    /// Withholding tax (%)
    #[serde(default)]
    pub withholding_rate: f64,

    /// Port handling charges (ETB)
    #[serde(default)]
    pub port_handling_etb: f64,

    /// Inland transport Djibouti → Addis Ababa (ETB)
    #[serde(default)]
    pub transport_djibouti_addis_etb: f64,

    /// Clearing agent fee (ETB)
    #[serde(default)]
    pub clearing_agent_etb: f64,

    /// Anything else (ETB)
    #[serde(default)]
    pub misc_cost_etb: f64,
}

fn default_quantity() -> f64 {
    1.0
}

fn default_unit() -> String {
    "pcs".to_string()
}

impl Default for CostInputs {
    fn default() -> Self {
        Self {
            item_name: String::new(),
            hs_code: String::new(),
            quantity: default_quantity(),
            unit: default_unit(),
            fob_usd: 0.0,
            freight_usd: 0.0,
            insurance_usd: 0.0,
            exchange_rate: 0.0,
            duty_rate: 0.0,
            excise_rate: 0.0,
            sur_tax_rate: 0.0,
            vat_rate: 0.0,
            withholding_rate: 0.0,
            port_handling_etb: 0.0,
            transport_djibouti_addis_etb: 0.0,
            clearing_agent_etb: 0.0,
            misc_cost_etb: 0.0,
        }
    }
}

/// Error for `--set key=value` style overrides
#[derive(Debug, Error, PartialEq)]
pub enum FieldError {
    #[error("Unknown cost field: {0}")]
    Unknown(String),

    #[error("Invalid value for {field}: '{value}' is not a number")]
    NotANumber { field: String, value: String },

    #[error("Expected key=value, got '{0}'")]
    Malformed(String),
}

/// Numeric fields that can be overridden, with their camelCase aliases
const NUMERIC_FIELDS: &[(&str, &str)] = &[
    ("quantity", "quantity"),
    ("fob_usd", "fobUsd"),
    ("freight_usd", "freightUsd"),
    ("insurance_usd", "insuranceUsd"),
    ("exchange_rate", "exchangeRate"),
    ("duty_rate", "dutyRate"),
    ("excise_rate", "exciseRate"),
    ("sur_tax_rate", "surTaxRate"),
    ("vat_rate", "vatRate"),
    ("withholding_rate", "withholdingRate"),
    ("port_handling_etb", "portHandlingEtb"),
    ("transport_djibouti_addis_etb", "transportDjiboutiAddisEtb"),
    ("clearing_agent_etb", "clearingAgentEtb"),
    ("misc_cost_etb", "miscCostEtb"),
];

impl CostInputs {
    /// Reference shipment used for new files and documentation examples
    pub fn sample() -> Self {
        Self {
            item_name: "Industrial Water Pumps".to_string(),
            hs_code: "8413.70".to_string(),
            quantity: 100.0,
            unit: "pcs".to_string(),
            fob_usd: 15_000.0,
            freight_usd: 2_500.0,
            insurance_usd: 150.0,
            exchange_rate: 121.5,
            duty_rate: 10.0,
            excise_rate: 0.0,
            sur_tax_rate: 10.0,
            vat_rate: 15.0,
            withholding_rate: 3.0,
            port_handling_etb: 15_000.0,
            transport_djibouti_addis_etb: 65_000.0,
            clearing_agent_etb: 12_000.0,
            misc_cost_etb: 5_000.0,
        }
    }

    /// All numeric field names (snake_case) in file order
    pub fn numeric_field_names() -> impl Iterator<Item = &'static str> {
        NUMERIC_FIELDS.iter().map(|(snake, _)| *snake)
    }

    /// Numeric fields paired with their current values
    pub fn numeric_fields(&self) -> Vec<(&'static str, f64)> {
        Self::numeric_field_names()
            .filter_map(|name| self.numeric(name).map(|v| (name, v)))
            .collect()
    }

    /// Read a numeric field by snake_case or camelCase name
    pub fn numeric(&self, field: &str) -> Option<f64> {
        let name = canonical_field(field)?;
        let value = match name {
            "quantity" => self.quantity,
            "fob_usd" => self.fob_usd,
            "freight_usd" => self.freight_usd,
            "insurance_usd" => self.insurance_usd,
            "exchange_rate" => self.exchange_rate,
            "duty_rate" => self.duty_rate,
            "excise_rate" => self.excise_rate,
            "sur_tax_rate" => self.sur_tax_rate,
            "vat_rate" => self.vat_rate,
            "withholding_rate" => self.withholding_rate,
            "port_handling_etb" => self.port_handling_etb,
            "transport_djibouti_addis_etb" => self.transport_djibouti_addis_etb,
            "clearing_agent_etb" => self.clearing_agent_etb,
            "misc_cost_etb" => self.misc_cost_etb,
            _ => return None,
        };
        Some(value)
    }

    /// Overwrite a numeric field by snake_case or camelCase name
    pub fn set_numeric(&mut self, field: &str, value: f64) -> Result<(), FieldError> {
        let name = canonical_field(field).ok_or_else(|| FieldError::Unknown(field.to_string()))?;
        let slot = match name {
            "quantity" => &mut self.quantity,
            "fob_usd" => &mut self.fob_usd,
            "freight_usd" => &mut self.freight_usd,
            "insurance_usd" => &mut self.insurance_usd,
            "exchange_rate" => &mut self.exchange_rate,
            "duty_rate" => &mut self.duty_rate,
            "excise_rate" => &mut self.excise_rate,
            "sur_tax_rate" => &mut self.sur_tax_rate,
            "vat_rate" => &mut self.vat_rate,
            "withholding_rate" => &mut self.withholding_rate,
            "port_handling_etb" => &mut self.port_handling_etb,
            "transport_djibouti_addis_etb" => &mut self.transport_djibouti_addis_etb,
            "clearing_agent_etb" => &mut self.clearing_agent_etb,
            "misc_cost_etb" => &mut self.misc_cost_etb,
            _ => return Err(FieldError::Unknown(field.to_string())),
        };
        *slot = value;
        Ok(())
    }

    /// Apply an override written as `key=value`
    pub fn apply_override(&mut self, assignment: &str) -> Result<(), FieldError> {
        let (key, raw) = assignment
            .split_once('=')
            .ok_or_else(|| FieldError::Malformed(assignment.to_string()))?;
        let key = key.trim();
        let raw = raw.trim();
        let value: f64 = raw.replace('_', "").parse().map_err(|_| FieldError::NotANumber {
            field: key.to_string(),
            value: raw.to_string(),
        })?;
        self.set_numeric(key, value)
    }
}

fn canonical_field(field: &str) -> Option<&'static str> {
    NUMERIC_FIELDS
        .iter()
        .find(|(snake, camel)| *snake == field || *camel == field)
        .map(|(snake, _)| *snake)
}

/// Derived landed cost figures (all ETB unless suffixed `_usd`)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub cif_usd: f64,
    pub cif_etb: f64,
    pub duty: f64,
    pub excise: f64,
    pub sur_tax: f64,
    pub vat: f64,
    pub withholding: f64,
    pub total_tax: f64,
    pub total_logistics: f64,
    pub total_landed_cost: f64,
    pub cost_per_unit: f64,

    /// Total landed cost over FOB value in ETB. Infinite or NaN when the FOB
    /// value or exchange rate is zero; check `is_finite()` before display.
    pub landed_factor: f64,
}

impl CostBreakdown {
    /// Cost composition in stacking order, for charts and tables
    pub fn components(&self) -> [(&'static str, f64); 7] {
        [
            ("CIF", self.cif_etb),
            ("Duty", self.duty),
            ("Excise", self.excise),
            ("Sur-tax", self.sur_tax),
            ("VAT", self.vat),
            ("Withholding", self.withholding),
            ("Logistics", self.total_logistics),
        ]
    }
}

/// One tax of the cascade with the base it was levied on
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TaxStage {
    pub name: &'static str,
    pub base: f64,
    /// Percentage
    pub rate: f64,
    pub amount: f64,
}

/// The five taxes in cascade order, with their bases
pub fn tax_stages(inputs: &CostInputs, b: &CostBreakdown) -> [TaxStage; 5] {
    [
        TaxStage {
            name: "Customs duty",
            base: b.cif_etb,
            rate: inputs.duty_rate,
            amount: b.duty,
        },
        TaxStage {
            name: "Excise",
            base: b.cif_etb + b.duty,
            rate: inputs.excise_rate,
            amount: b.excise,
        },
        TaxStage {
            name: "Sur-tax",
            base: b.cif_etb + b.duty + b.excise,
            rate: inputs.sur_tax_rate,
            amount: b.sur_tax,
        },
        TaxStage {
            name: "VAT",
            base: b.cif_etb + b.duty + b.excise + b.sur_tax,
            rate: inputs.vat_rate,
            amount: b.vat,
        },
        TaxStage {
            name: "Withholding",
            base: b.cif_etb,
            rate: inputs.withholding_rate,
            amount: b.withholding,
        },
    ]
}

/// Run the full landed cost calculation
pub fn calculate(inputs: &CostInputs) -> CostBreakdown {
    let cif_usd = inputs.fob_usd + inputs.freight_usd + inputs.insurance_usd;
    let cif_etb = cif_usd * inputs.exchange_rate;

    let duty = cif_etb * pct(inputs.duty_rate);
    let excise = (cif_etb + duty) * pct(inputs.excise_rate);
    let sur_tax = (cif_etb + duty + excise) * pct(inputs.sur_tax_rate);
    let vat = (cif_etb + duty + excise + sur_tax) * pct(inputs.vat_rate);
    let withholding = cif_etb * pct(inputs.withholding_rate);

    let total_tax = duty + excise + sur_tax + vat + withholding;

    let total_logistics = inputs.port_handling_etb
        + inputs.transport_djibouti_addis_etb
        + inputs.clearing_agent_etb
        + inputs.misc_cost_etb;

    let total_landed_cost = cif_etb + total_tax + total_logistics;

    // Zero (or NaN) quantity counts as a single unit
    let units = if inputs.quantity == 0.0 || inputs.quantity.is_nan() {
        1.0
    } else {
        inputs.quantity
    };
    let cost_per_unit = total_landed_cost / units;

    let landed_factor = total_landed_cost / (inputs.fob_usd * inputs.exchange_rate);

    tracing::debug!(
        cif_etb,
        total_tax,
        total_landed_cost,
        "recomputed landed cost"
    );

    CostBreakdown {
        cif_usd,
        cif_etb,
        duty,
        excise,
        sur_tax,
        vat,
        withholding,
        total_tax,
        total_logistics,
        total_landed_cost,
        cost_per_unit,
        landed_factor,
    }
}

fn pct(rate: f64) -> f64 {
    rate / 100.0
}
