//! Shipment entity - one import consignment and its cost inputs
//!
//! Stored as `<name>.lce.yaml`. The inputs block maps field-for-field onto
//! [`CostInputs`]; everything else is bookkeeping.

use chrono::{DateTime, Utc};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::entity::{Entity, FILE_SUFFIX};
use crate::core::identity::{ShipmentId, SHIPMENT_PREFIX};
use crate::core::landed_cost::CostInputs;
use crate::yaml::{parse_yaml, parse_yaml_file, YamlError};

#[derive(Debug, Error, Diagnostic)]
pub enum ShipmentError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Yaml(#[from] YamlError),

    #[error("Failed to write {path}: {source}")]
    #[diagnostic(code(lce::shipment::write))]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} already exists")]
    #[diagnostic(code(lce::shipment::exists), help("Pass --force to overwrite it"))]
    AlreadyExists { path: PathBuf },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shipment {
    /// Unique identifier (SHP-...)
    pub id: ShipmentId,

    /// Short description of the consignment
    pub title: String,

    /// Free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Supplier or origin description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,

    /// Cost inputs
    pub inputs: CostInputs,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Author
    pub author: String,

    /// Revision counter, starts at 1
    #[serde(default = "default_revision")]
    pub revision: u32,
}

fn default_revision() -> u32 {
    1
}

impl Entity for Shipment {
    const PREFIX: &'static str = SHIPMENT_PREFIX;

    fn id_string(&self) -> String {
        self.id.to_string()
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }

    fn author(&self) -> &str {
        &self.author
    }
}

impl Shipment {
    /// Parse from YAML text
    pub fn from_yaml(content: &str, filename: &str) -> Result<Self, ShipmentError> {
        Ok(parse_yaml(content, filename)?)
    }

    /// Load from a file
    pub fn load(path: &Path) -> Result<Self, ShipmentError> {
        Ok(parse_yaml_file(path)?)
    }

    /// Write a rendered shipment document to `path`.
    ///
    /// The text is parsed back first so a malformed document never lands on
    /// disk. An existing file is only replaced when `force` is set.
    pub fn create(path: &Path, content: &str, force: bool) -> Result<Self, ShipmentError> {
        if path.exists() && !force {
            return Err(ShipmentError::AlreadyExists {
                path: path.to_path_buf(),
            });
        }
        let shipment = Self::from_yaml(content, &path.display().to_string())?;
        std::fs::write(path, content).map_err(|source| ShipmentError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(shipment)
    }
}

/// Slugified title plus suffix, falling back to the ID for titles with no
/// ASCII alphanumerics
pub fn file_name_for(title: &str, id: &ShipmentId) -> String {
    let slug = slugify(title);
    if slug.is_empty() {
        format!("{}{}", id, FILE_SUFFIX)
    } else {
        format!("{}{}", slug, FILE_SUFFIX)
    }
}

/// Lowercase, ASCII alphanumerics separated by single dashes
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}
