//! Core module - the landed cost engine and its supporting types

pub mod config;
pub mod entity;
pub mod identity;
pub mod landed_cost;
pub mod logging;
pub mod params;
pub mod recommend;
pub mod regression;
pub mod scenario;
pub mod state;

pub use config::{Config, ConfigError};
pub use entity::Entity;
pub use identity::{IdParseError, ShipmentId};
pub use landed_cost::{calculate, tax_stages, CostBreakdown, CostInputs, FieldError, TaxStage};
pub use params::{AnalysisParameter, ParamKey, ParamType, CATALOG};
pub use recommend::{recommend, Recommendation, RecommendationKind, RuleSource};
pub use regression::{regress, Direction, LinePoint, RegressionStats, Strength};
pub use scenario::{generate, PairProfile, ScenarioPoint, SineSequence};
pub use state::{AxisError, CorrelationReport, EngineState, View};
