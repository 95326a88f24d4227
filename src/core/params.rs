//! Analysis parameter catalog - the selectable axes of a correlation scenario

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::landed_cost::{CostBreakdown, CostInputs};

/// Base value used whenever a parameter has no value or a zero value
pub const FALLBACK_BASE: f64 = 100.0;

/// Injected base for the HR cost axis (ETB)
pub const HR_COST_BASE: f64 = 250_000.0;

/// Injected base for the warehouse cost axis (ETB)
pub const WAREHOUSE_COST_BASE: f64 = 45_000.0;

/// Whether a parameter is something you change or something you measure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    Input,
    Output,
}

impl std::fmt::Display for ParamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamType::Input => write!(f, "input"),
            ParamType::Output => write!(f, "output"),
        }
    }
}

/// Every key that can be placed on a scenario axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParamKey {
    FobUsd,
    FreightUsd,
    ExchangeRate,
    DutyRate,
    HrCost,
    WarehouseCost,
    TotalTax,
    TotalLandedCost,
    CostPerUnit,
    Revenue,
    NetProfit,
}

/// Catalog entry
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AnalysisParameter {
    pub key: ParamKey,
    pub label: &'static str,
    #[serde(rename = "type")]
    pub param_type: ParamType,
}

/// The full catalog: six inputs followed by five outputs
pub const CATALOG: &[AnalysisParameter] = &[
    AnalysisParameter { key: ParamKey::FobUsd, label: "FOB Value (USD)", param_type: ParamType::Input },
    AnalysisParameter { key: ParamKey::FreightUsd, label: "Freight Cost (USD)", param_type: ParamType::Input },
    AnalysisParameter { key: ParamKey::ExchangeRate, label: "Exchange Rate (ETB/USD)", param_type: ParamType::Input },
    AnalysisParameter { key: ParamKey::DutyRate, label: "Customs Duty Rate (%)", param_type: ParamType::Input },
    AnalysisParameter { key: ParamKey::HrCost, label: "HR / Staffing Cost (ETB)", param_type: ParamType::Input },
    AnalysisParameter { key: ParamKey::WarehouseCost, label: "Warehouse Cost (ETB)", param_type: ParamType::Input },
    AnalysisParameter { key: ParamKey::TotalTax, label: "Total Tax (ETB)", param_type: ParamType::Output },
    AnalysisParameter { key: ParamKey::TotalLandedCost, label: "Total Landed Cost (ETB)", param_type: ParamType::Output },
    AnalysisParameter { key: ParamKey::CostPerUnit, label: "Cost per Unit (ETB)", param_type: ParamType::Output },
    AnalysisParameter { key: ParamKey::Revenue, label: "Revenue (ETB)", param_type: ParamType::Output },
    AnalysisParameter { key: ParamKey::NetProfit, label: "Net Profit (ETB)", param_type: ParamType::Output },
];

impl ParamKey {
    /// Key as written on the command line and in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamKey::FobUsd => "fobUsd",
            ParamKey::FreightUsd => "freightUsd",
            ParamKey::ExchangeRate => "exchangeRate",
            ParamKey::DutyRate => "dutyRate",
            ParamKey::HrCost => "hrCost",
            ParamKey::WarehouseCost => "warehouseCost",
            ParamKey::TotalTax => "totalTax",
            ParamKey::TotalLandedCost => "totalLandedCost",
            ParamKey::CostPerUnit => "costPerUnit",
            ParamKey::Revenue => "revenue",
            ParamKey::NetProfit => "netProfit",
        }
    }

    /// Catalog entry for this key
    pub fn parameter(&self) -> &'static AnalysisParameter {
        CATALOG
            .iter()
            .find(|p| p.key == *self)
            .unwrap_or(&CATALOG[0])
    }

    pub fn label(&self) -> &'static str {
        self.parameter().label
    }

    pub fn param_type(&self) -> ParamType {
        self.parameter().param_type
    }

    /// Base value when this key is read from the input side
    ///
    /// HR and warehouse cost do not exist on a shipment; they are injected as
    /// fixed constants. Output keys have no input-side value.
    pub fn input_value(&self, inputs: &CostInputs) -> Option<f64> {
        match self {
            ParamKey::FobUsd => Some(inputs.fob_usd),
            ParamKey::FreightUsd => Some(inputs.freight_usd),
            ParamKey::ExchangeRate => Some(inputs.exchange_rate),
            ParamKey::DutyRate => Some(inputs.duty_rate),
            ParamKey::HrCost => Some(HR_COST_BASE),
            ParamKey::WarehouseCost => Some(WAREHOUSE_COST_BASE),
            _ => None,
        }
    }

    /// Base value when this key is read from the output side
    ///
    /// Revenue and net profit have no calculation path and always resolve
    /// through the fallback.
    pub fn output_value(&self, outputs: &CostBreakdown) -> Option<f64> {
        match self {
            ParamKey::TotalTax => Some(outputs.total_tax),
            ParamKey::TotalLandedCost => Some(outputs.total_landed_cost),
            ParamKey::CostPerUnit => Some(outputs.cost_per_unit),
            _ => None,
        }
    }

    /// Input-side base with the fallback applied
    pub fn input_base(&self, inputs: &CostInputs) -> f64 {
        or_fallback(self.input_value(inputs))
    }

    /// Output-side base with the fallback applied
    pub fn output_base(&self, outputs: &CostBreakdown) -> f64 {
        or_fallback(self.output_value(outputs))
    }

    pub fn inputs() -> impl Iterator<Item = &'static AnalysisParameter> {
        CATALOG.iter().filter(|p| p.param_type == ParamType::Input)
    }

    pub fn outputs() -> impl Iterator<Item = &'static AnalysisParameter> {
        CATALOG.iter().filter(|p| p.param_type == ParamType::Output)
    }
}

fn or_fallback(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v != 0.0 && !v.is_nan() => v,
        _ => FALLBACK_BASE,
    }
}

impl std::fmt::Display for ParamKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ParamKey {
    type Err = String;

    /// Accepts the camelCase key, its snake_case form, or any casing of either
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s.chars().filter(|c| *c != '_' && *c != '-').collect();
        CATALOG
            .iter()
            .map(|p| p.key)
            .find(|k| k.as_str().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| {
                let known: Vec<&str> = CATALOG.iter().map(|p| p.key.as_str()).collect();
                format!("Unknown parameter '{}'. Known: {}", s, known.join(", "))
            })
    }
}
