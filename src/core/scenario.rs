//! What-if scenario generator
//!
//! Fabricates plausible correlated samples around the current shipment so the
//! relationship between two parameters can be visualized. This is a demo
//! heuristic, not a statistical model: the noise table below is hand tuned and
//! its asymmetries are intentional.

use serde::{Deserialize, Serialize};

use crate::core::landed_cost::{CostBreakdown, CostInputs};
use crate::core::params::ParamKey;

/// Number of samples in a default scenario run
pub const DEFAULT_SAMPLE_COUNT: usize = 50;

/// Noise factor for pairs missing from [`NOISE_FACTORS`]
pub const DEFAULT_NOISE_FACTOR: f64 = 0.5;

/// Noise factors above this mean "no real relationship"
pub const NO_RELATIONSHIP_THRESHOLD: f64 = 2.0;

/// Maximum relative swing applied to the x base (±30%)
const VARIATION_SPAN: f64 = 0.6;

/// Scale applied to the noise term
const NOISE_SCALE: f64 = 0.2;

/// Hand-tuned noise per (x, y) pair; lower is a tighter correlation.
/// Lookups also match the reversed pair.
pub const NOISE_FACTORS: &[(ParamKey, ParamKey, f64)] = &[
    (ParamKey::FobUsd, ParamKey::TotalLandedCost, 0.05),
    (ParamKey::FobUsd, ParamKey::TotalTax, 0.05),
    (ParamKey::FobUsd, ParamKey::CostPerUnit, 0.1),
    (ParamKey::ExchangeRate, ParamKey::TotalLandedCost, 0.08),
    (ParamKey::ExchangeRate, ParamKey::CostPerUnit, 0.1),
    (ParamKey::ExchangeRate, ParamKey::Revenue, 2.5),
    (ParamKey::DutyRate, ParamKey::TotalTax, 0.1),
    (ParamKey::FreightUsd, ParamKey::TotalLandedCost, 0.3),
    (ParamKey::HrCost, ParamKey::NetProfit, 0.8),
    (ParamKey::HrCost, ParamKey::TotalLandedCost, 3.0),
    (ParamKey::WarehouseCost, ParamKey::NetProfit, 1.2),
    (ParamKey::WarehouseCost, ParamKey::TotalTax, 3.5),
];

/// One synthetic sample; `z` only sizes the marker in charts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl ScenarioPoint {
    pub fn as_pair(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

/// Sine-based pseudo-random sequence
///
/// Each draw is `frac(sin(seed) * 10000)` with the seed incremented after the
/// draw. The output is fully determined by the draw index. It has poor
/// statistical quality and no security properties; it exists only so the
/// same shipment always renders the same scatter.
#[derive(Debug, Clone)]
pub struct SineSequence {
    seed: f64,
}

impl SineSequence {
    pub fn new() -> Self {
        Self { seed: 1.0 }
    }

    /// Next value in [0, 1)
    pub fn next_unit(&mut self) -> f64 {
        let x = self.seed.sin() * 10_000.0;
        self.seed += 1.0;
        x - x.floor()
    }
}

impl Default for SineSequence {
    fn default() -> Self {
        Self::new()
    }
}

/// How a pair of parameters is simulated
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PairProfile {
    pub noise_factor: f64,
    /// 1.0 normally, 0.1 when the noise factor signals no relationship
    pub relevance: f64,
    /// -1.0 for cost-like drivers against net profit
    pub slope_sign: f64,
}

impl PairProfile {
    pub fn for_pair(x: ParamKey, y: ParamKey) -> Self {
        let noise_factor = noise_factor(x, y);
        let relevance = if noise_factor > NO_RELATIONSHIP_THRESHOLD {
            0.1
        } else {
            1.0
        };
        let slope_sign = if is_inverse(x, y) { -1.0 } else { 1.0 };
        Self {
            noise_factor,
            relevance,
            slope_sign,
        }
    }
}

/// Noise factor for a pair, checking both orientations
pub fn noise_factor(x: ParamKey, y: ParamKey) -> f64 {
    NOISE_FACTORS
        .iter()
        .find(|(a, b, _)| (*a == x && *b == y) || (*a == y && *b == x))
        .map(|(_, _, n)| *n)
        .unwrap_or(DEFAULT_NOISE_FACTOR)
}

/// Cost-like drivers move net profit the other way
///
/// Matches on the key text, so `hrCost`, `warehouseCost`, `freightUsd` and
/// `totalTax` qualify while `costPerUnit` (lower-case "cost") does not.
pub fn is_inverse(x: ParamKey, y: ParamKey) -> bool {
    let name = x.as_str();
    let costly = name.contains("Cost") || name.contains("freight") || name.contains("Tax");
    costly && y == ParamKey::NetProfit
}

/// Generate `count` samples around the current shipment, sorted by x
///
/// The sequence restarts on every call, so identical arguments always yield
/// identical points.
pub fn generate(
    inputs: &CostInputs,
    outputs: &CostBreakdown,
    x: ParamKey,
    y: ParamKey,
    count: usize,
) -> Vec<ScenarioPoint> {
    let x_base = x.input_base(inputs);
    let y_base = y.output_base(outputs);
    let profile = PairProfile::for_pair(x, y);

    tracing::debug!(
        x = %x,
        y = %y,
        x_base,
        y_base,
        noise_factor = profile.noise_factor,
        relevance = profile.relevance,
        slope_sign = profile.slope_sign,
        count,
        "generating scenario"
    );

    let mut rng = SineSequence::new();
    let mut points: Vec<ScenarioPoint> = Vec::with_capacity(count);

    for _ in 0..count {
        let variation = (rng.next_unit() - 0.5) * VARIATION_SPAN;
        let x_value = x_base * (1.0 + variation);

        let expected = y_base * (1.0 + variation * profile.slope_sign * profile.relevance);
        let noise = y_base * profile.noise_factor * (rng.next_unit() * 2.0 - 1.0) * NOISE_SCALE;

        points.push(ScenarioPoint {
            x: x_value,
            y: (expected + noise).max(0.0),
            z: 1.0,
        });
    }

    points.sort_by(|a, b| a.x.total_cmp(&b.x));
    points
}
