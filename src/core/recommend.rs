//! Advisory rules keyed on a parameter pair and its correlation
//!
//! Resolution order: pair-specific business rules, then generic tiers by |r|,
//! then a catch-all. The first match wins and always yields two entries.

use serde::Serialize;

use crate::core::params::ParamKey;

/// Tone of a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Warning,
    Success,
    Info,
}

impl std::fmt::Display for RecommendationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecommendationKind::Warning => write!(f, "warning"),
            RecommendationKind::Success => write!(f, "success"),
            RecommendationKind::Info => write!(f, "info"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub title: &'static str,
    pub desc: &'static str,
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
}

const fn rec(title: &'static str, desc: &'static str, kind: RecommendationKind) -> Recommendation {
    Recommendation { title, desc, kind }
}

use RecommendationKind::{Info, Success, Warning};

/// Where a recommendation set came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleSource {
    PairRule,
    StrongTier,
    ModerateTier,
    WeakTier,
    Default,
}

/// Recommendations for a pair, ignoring which rule produced them
pub fn recommend(x: ParamKey, y: ParamKey, r: f64) -> [Recommendation; 2] {
    recommend_with_source(x, y, r).0
}

/// Recommendations for a pair plus the rule tier that matched
pub fn recommend_with_source(x: ParamKey, y: ParamKey, r: f64) -> ([Recommendation; 2], RuleSource) {
    if let Some(recs) = pair_rule(x, y, r) {
        tracing::debug!(x = %x, y = %y, r, "pair rule matched");
        return (recs, RuleSource::PairRule);
    }

    let magnitude = r.abs();
    let (recs, source) = if magnitude > 0.8 {
        (
            [
                rec(
                    "Dominant cost driver",
                    "This parameter explains most of the movement in the outcome. Treat it as a primary lever in pricing and budget reviews.",
                    Warning,
                ),
                rec(
                    "Build it into planning",
                    "Model at least a best and worst case for this parameter before committing to a purchase order.",
                    Info,
                ),
            ],
            RuleSource::StrongTier,
        )
    } else if magnitude > 0.5 {
        (
            [
                rec(
                    "Meaningful relationship",
                    "The outcome responds to this parameter, but other factors also matter. Track it alongside the main cost drivers.",
                    Info,
                ),
                rec(
                    "Monitor monthly",
                    "Review this parameter in the monthly cost meeting and flag changes above 10%.",
                    Info,
                ),
            ],
            RuleSource::ModerateTier,
        )
    } else if magnitude < 0.3 {
        (
            [
                rec(
                    "Little influence",
                    "Changes in this parameter barely move the outcome. Effort is better spent on other cost components.",
                    Success,
                ),
                rec(
                    "Look elsewhere",
                    "Try pairing the outcome with FOB value, exchange rate or duty rate to find the real drivers.",
                    Info,
                ),
            ],
            RuleSource::WeakTier,
        )
    } else {
        (
            [
                rec(
                    "Mixed signal",
                    "The relationship is present but noisy. Collect more shipments before acting on it.",
                    Info,
                ),
                rec(
                    "Review assumptions",
                    "Check that rates and logistics fees on this shipment reflect current tariffs and contracts.",
                    Info,
                ),
            ],
            RuleSource::Default,
        )
    };

    tracing::debug!(x = %x, y = %y, r, source = ?source, "generic rule matched");
    (recs, source)
}

fn pair_rule(x: ParamKey, y: ParamKey, r: f64) -> Option<[Recommendation; 2]> {
    use ParamKey::*;

    let recs = match (x, y) {
        (ExchangeRate, TotalLandedCost) => {
            if r > 0.7 {
                [
                    rec(
                        "High currency exposure",
                        "Landed cost moves almost one-for-one with the birr rate. Pay suppliers early when a devaluation is expected.",
                        Warning,
                    ),
                    rec(
                        "Secure FX allocation",
                        "Apply for foreign currency allocation ahead of LC opening to lock in today's rate.",
                        Info,
                    ),
                ]
            } else {
                [
                    rec(
                        "Currency impact contained",
                        "Exchange rate swings have a limited effect on this shipment's landed cost.",
                        Success,
                    ),
                    rec(
                        "Keep watching the rate",
                        "Re-run the analysis whenever the official rate moves by more than 5%.",
                        Info,
                    ),
                ]
            }
        }
        (DutyRate, TotalTax) => {
            if r > 0.7 {
                [
                    rec(
                        "Duty drives the tax bill",
                        "Because excise, sur-tax and VAT are levied on a base that includes duty, every point of duty compounds.",
                        Warning,
                    ),
                    rec(
                        "Verify HS classification",
                        "Confirm the tariff code with a licensed customs broker and check investment-incentive duty exemptions.",
                        Info,
                    ),
                ]
            } else {
                [
                    rec(
                        "Duty is a minor factor",
                        "Other taxes in the cascade outweigh duty for this item.",
                        Info,
                    ),
                    rec(
                        "Focus on VAT recovery",
                        "Make sure import VAT is claimed as input tax on the next VAT return.",
                        Success,
                    ),
                ]
            }
        }
        (FreightUsd, TotalLandedCost) => {
            if r > 0.5 {
                [
                    rec(
                        "Freight is material",
                        "Freight enters the CIF value and is taxed through the whole cascade. Negotiate annual rates with forwarders.",
                        Warning,
                    ),
                    rec(
                        "Consolidate shipments",
                        "Combine orders into full containers to cut per-unit freight.",
                        Info,
                    ),
                ]
            } else {
                [
                    rec(
                        "Freight under control",
                        "Freight cost has a small effect relative to goods value and taxes.",
                        Success,
                    ),
                    rec(
                        "Benchmark annually",
                        "Request competing quotes once a year to keep rates honest.",
                        Info,
                    ),
                ]
            }
        }
        (FobUsd, TotalLandedCost) => {
            if r > 0.8 {
                [
                    rec(
                        "Supplier price is the main lever",
                        "Each dollar saved at origin is also saved in every tax stage. Prioritize supplier negotiation.",
                        Warning,
                    ),
                    rec(
                        "Ask for volume pricing",
                        "Larger, less frequent orders usually earn discounts that outweigh the extra working capital.",
                        Success,
                    ),
                ]
            } else {
                [
                    rec(
                        "Fixed costs dominate",
                        "Logistics and fees are large relative to goods value; small orders are expensive to land.",
                        Info,
                    ),
                    rec(
                        "Increase order size",
                        "Spread fixed port and clearing charges over more units.",
                        Info,
                    ),
                ]
            }
        }
        (HrCost, NetProfit) => {
            if r < -0.5 {
                [
                    rec(
                        "Staff costs squeeze margin",
                        "Net profit falls noticeably as HR cost rises. Review staffing against shipment volume.",
                        Warning,
                    ),
                    rec(
                        "Automate clearance paperwork",
                        "Digitizing customs documentation reduces the hours spent per shipment.",
                        Info,
                    ),
                ]
            } else {
                [
                    rec(
                        "HR cost is sustainable",
                        "Staffing cost is not the limiting factor for profitability right now.",
                        Success,
                    ),
                    rec(
                        "Invest in training",
                        "Skilled declarants reduce classification errors and penalties.",
                        Info,
                    ),
                ]
            }
        }
        (WarehouseCost, NetProfit) => {
            if r < -0.5 {
                [
                    rec(
                        "Storage erodes profit",
                        "Warehouse and demurrage charges are cutting into margin. Shorten dwell time after clearance.",
                        Warning,
                    ),
                    rec(
                        "Negotiate bonded storage",
                        "Bonded warehousing defers duty until goods are sold.",
                        Info,
                    ),
                ]
            } else {
                [
                    rec(
                        "Storage cost acceptable",
                        "Warehousing is not a significant drag on profit.",
                        Success,
                    ),
                    rec(
                        "Plan for peak season",
                        "Reserve extra capacity before seasonal import peaks to avoid spot rates.",
                        Info,
                    ),
                ]
            }
        }
        _ => return None,
    };

    Some(recs)
}
