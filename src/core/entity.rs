//! Entity trait - common interface for documents stored as YAML files

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};

/// Suffix shared by every LCE document
pub const FILE_SUFFIX: &str = ".lce.yaml";

/// Common trait for all LCE documents
pub trait Entity: Serialize + DeserializeOwned {
    /// The ID prefix (e.g., "SHP")
    const PREFIX: &'static str;

    /// The entity's ID rendered as text
    fn id_string(&self) -> String;

    /// Get the entity's title
    fn title(&self) -> &str;

    /// Get the creation timestamp
    fn created(&self) -> DateTime<Utc>;

    /// Get the author
    fn author(&self) -> &str;
}

/// Whether a path looks like an LCE document
pub fn is_entity_file(path: &std::path::Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().ends_with(FILE_SUFFIX))
        .unwrap_or(false)
}
