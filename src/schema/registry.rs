//! Schema registry - embedded JSON schemas

use rust_embed::Embed;
use std::collections::HashMap;

#[derive(Embed)]
#[folder = "schemas/"]
struct EmbeddedSchemas;

/// Name of the shipment schema
pub const SHIPMENT_SCHEMA: &str = "shipment";

/// Registry of JSON schemas for file validation
pub struct SchemaRegistry {
    schemas: HashMap<String, String>,
}

impl SchemaRegistry {
    /// Create a new schema registry with embedded schemas
    pub fn new() -> Self {
        let mut schemas = HashMap::new();

        for file in EmbeddedSchemas::iter() {
            let filename = file.as_ref();
            let Some(name) = filename.strip_suffix(".schema.json") else {
                continue;
            };
            if let Some(content) = EmbeddedSchemas::get(filename) {
                if let Ok(text) = std::str::from_utf8(&content.data) {
                    schemas.insert(name.to_string(), text.to_string());
                }
            }
        }

        Self { schemas }
    }

    /// Get the JSON schema by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.schemas.get(name).map(|s| s.as_str())
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shipment_schema_embedded() {
        let registry = SchemaRegistry::new();
        let schema: serde_json::Value =
            serde_json::from_str(registry.get(SHIPMENT_SCHEMA).unwrap()).unwrap();
        assert_eq!(schema["title"], "Shipment");
    }

    #[test]
    fn test_unknown_schema() {
        assert!(SchemaRegistry::new().get("requirement").is_none());
    }
}
