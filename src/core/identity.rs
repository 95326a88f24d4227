//! Shipment identifiers - `SHP-` prefix followed by a ULID

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use ulid::Ulid;

/// Prefix carried by every shipment ID
pub const SHIPMENT_PREFIX: &str = "SHP";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShipmentId(Ulid);

#[derive(Debug, Error, PartialEq)]
pub enum IdParseError {
    #[error("ID must start with 'SHP-': {0}")]
    MissingPrefix(String),

    #[error("Invalid ULID in ID {0}")]
    InvalidUlid(String),
}

impl ShipmentId {
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for ShipmentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ShipmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", SHIPMENT_PREFIX, self.0)
    }
}

impl FromStr for ShipmentId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s
            .strip_prefix(SHIPMENT_PREFIX)
            .and_then(|r| r.strip_prefix('-'))
            .ok_or_else(|| IdParseError::MissingPrefix(s.to_string()))?;
        let ulid = Ulid::from_string(rest).map_err(|_| IdParseError::InvalidUlid(s.to_string()))?;
        Ok(Self(ulid))
    }
}

impl Serialize for ShipmentId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ShipmentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
