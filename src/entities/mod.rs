//! Entity type definitions

pub mod shipment;

pub use shipment::{Shipment, ShipmentError};
