//! Engine state - the inputs, the selected view and axes, and derived results
//!
//! Inputs are only reachable through setters so the breakdown is recomputed
//! exactly once per change and can never go stale.

use serde::{Deserialize, Serialize};

use crate::core::landed_cost::{calculate, CostBreakdown, CostInputs, FieldError};
use crate::core::params::{ParamKey, ParamType};
use crate::core::recommend::{recommend_with_source, Recommendation, RuleSource};
use crate::core::regression::{regress, Direction, RegressionStats, Strength};
use crate::core::scenario::{generate, PairProfile, ScenarioPoint, DEFAULT_SAMPLE_COUNT};

/// Which view the engine is serving
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    /// Cost breakdown only
    #[default]
    Calculator,
    /// Breakdown plus scenario, regression and recommendations
    Correlation,
}

/// Axis selection that cannot be used for a scenario
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AxisError {
    #[error("X axis must be an input parameter, but '{0}' is an output")]
    XNotInput(ParamKey),

    #[error("Y axis must be an output parameter, but '{0}' is an input")]
    YNotOutput(ParamKey),
}

/// Everything the correlation view shows
#[derive(Debug, Clone, Serialize)]
pub struct CorrelationReport {
    pub x: ParamKey,
    pub y: ParamKey,
    pub profile: PairProfile,
    pub points: Vec<ScenarioPoint>,
    pub stats: RegressionStats,
    pub strength: Strength,
    pub direction: Direction,
    pub recommendations: [Recommendation; 2],
    pub rule_source: RuleSource,
}

#[derive(Debug, Clone)]
pub struct EngineState {
    inputs: CostInputs,
    breakdown: CostBreakdown,
    active_view: View,
    x_axis: ParamKey,
    y_axis: ParamKey,
    sample_count: usize,
    neutral_zero: bool,
}

impl EngineState {
    pub fn new(inputs: CostInputs) -> Self {
        let breakdown = calculate(&inputs);
        Self {
            inputs,
            breakdown,
            active_view: View::Calculator,
            x_axis: ParamKey::FobUsd,
            y_axis: ParamKey::TotalLandedCost,
            sample_count: DEFAULT_SAMPLE_COUNT,
            neutral_zero: false,
        }
    }

    pub fn with_sample_count(mut self, count: usize) -> Self {
        self.sample_count = count;
        self
    }

    /// Report r = 0 as "No correlation" instead of "Negative"
    pub fn with_neutral_zero(mut self, neutral: bool) -> Self {
        self.neutral_zero = neutral;
        self
    }

    pub fn inputs(&self) -> &CostInputs {
        &self.inputs
    }

    pub fn breakdown(&self) -> &CostBreakdown {
        &self.breakdown
    }

    pub fn active_view(&self) -> View {
        self.active_view
    }

    pub fn axes(&self) -> (ParamKey, ParamKey) {
        (self.x_axis, self.y_axis)
    }

    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Replace all inputs
    pub fn set_inputs(&mut self, inputs: CostInputs) {
        if inputs != self.inputs {
            self.inputs = inputs;
            self.recompute();
        }
    }

    /// Edit inputs in place
    pub fn update_inputs(&mut self, edit: impl FnOnce(&mut CostInputs)) {
        let mut next = self.inputs.clone();
        edit(&mut next);
        self.set_inputs(next);
    }

    /// Set one numeric field by name
    pub fn set_field(&mut self, field: &str, value: f64) -> Result<(), FieldError> {
        let mut next = self.inputs.clone();
        next.set_numeric(field, value)?;
        self.set_inputs(next);
        Ok(())
    }

    pub fn set_view(&mut self, view: View) {
        self.active_view = view;
    }

    /// Choose scenario axes; x must be an input and y an output
    pub fn set_axes(&mut self, x: ParamKey, y: ParamKey) -> Result<(), AxisError> {
        if x.param_type() != ParamType::Input {
            return Err(AxisError::XNotInput(x));
        }
        if y.param_type() != ParamType::Output {
            return Err(AxisError::YNotOutput(y));
        }
        self.x_axis = x;
        self.y_axis = y;
        Ok(())
    }

    fn recompute(&mut self) {
        self.breakdown = calculate(&self.inputs);
    }

    /// Build the correlation view; `None` while in calculator view
    pub fn correlation(&self) -> Option<CorrelationReport> {
        if self.active_view != View::Correlation {
            return None;
        }
        Some(self.analyze())
    }

    /// Run scenario, regression and recommendations for the current axes
    pub fn analyze(&self) -> CorrelationReport {
        let (x, y) = (self.x_axis, self.y_axis);
        let points = generate(&self.inputs, &self.breakdown, x, y, self.sample_count);
        let pairs: Vec<(f64, f64)> = points.iter().map(ScenarioPoint::as_pair).collect();
        let stats = regress(&pairs);
        let (recommendations, rule_source) = recommend_with_source(x, y, stats.r);

        CorrelationReport {
            x,
            y,
            profile: PairProfile::for_pair(x, y),
            strength: Strength::of(stats.r),
            direction: Direction::of(stats.r, self.neutral_zero),
            points,
            stats,
            recommendations,
            rule_source,
        }
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::new(CostInputs::sample())
    }
}
