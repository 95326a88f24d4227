//! LCE: Landed Cost Engine
//!
//! Import landed-cost calculation for Ethiopian customs: the tax cascade on a
//! CIF value, local logistics, and a synthetic what-if scenario with
//! correlation analysis and rule-based recommendations.
//!
//! The engine lives in [`core`] and is pure; [`entities`], [`schema`] and
//! [`yaml`] handle shipment files; [`cli`] is the `lce` binary's front end.

pub mod cli;
pub mod core;
pub mod entities;
pub mod schema;
pub mod yaml;
