//! Shipment validation - JSON schema conformance plus value sanity checks

use miette::{Diagnostic, NamedSource, SourceOffset, SourceSpan};
use thiserror::Error;

use crate::core::landed_cost::CostInputs;
use crate::entities::shipment::Shipment;
use crate::schema::registry::{SchemaRegistry, SHIPMENT_SCHEMA};
use crate::yaml::{parse_yaml, YamlError};

/// A single schema violation
#[derive(Debug, Error, Diagnostic)]
#[error("{path}: {message}")]
pub struct Violation {
    /// JSON pointer of the offending value ("/inputs/vat_rate")
    pub path: String,
    pub message: String,

    #[label("{message}")]
    pub span: Option<SourceSpan>,
}

/// A file that does not conform to the schema
#[derive(Debug, Error, Diagnostic)]
#[error("{filename} failed schema validation with {} error(s)", .violations.len())]
#[diagnostic(
    code(lce::schema::invalid),
    help("Compare the file against one created with `lce new`")
)]
pub struct SchemaViolations {
    pub filename: String,

    #[source_code]
    pub src: NamedSource<String>,

    #[related]
    pub violations: Vec<Violation>,
}

#[derive(Debug, Error, Diagnostic)]
pub enum ValidationError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Yaml(#[from] YamlError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Schema(SchemaViolations),

    #[error("Schema '{0}' is missing or invalid")]
    #[diagnostic(code(lce::schema::unavailable))]
    SchemaUnavailable(String),
}

impl ValidationError {
    pub fn violation_count(&self) -> usize {
        match self {
            ValidationError::Schema(v) => v.violations.len(),
            _ => 1,
        }
    }
}

/// Something legal but probably wrong
#[derive(Debug, Clone, PartialEq)]
pub struct Warning {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

pub struct Validator {
    schema: Option<jsonschema::Validator>,
}

impl Validator {
    pub fn new(registry: &SchemaRegistry) -> Self {
        let schema = registry
            .get(SHIPMENT_SCHEMA)
            .and_then(|text| serde_json::from_str::<serde_json::Value>(text).ok())
            .and_then(|value| jsonschema::validator_for(&value).ok());
        Self { schema }
    }

    /// Validate file content, returning warnings when it conforms
    pub fn validate(&self, content: &str, filename: &str) -> Result<Vec<Warning>, ValidationError> {
        let schema = self
            .schema
            .as_ref()
            .ok_or_else(|| ValidationError::SchemaUnavailable(SHIPMENT_SCHEMA.to_string()))?;

        let instance: serde_json::Value = parse_yaml(content, filename)?;

        let violations: Vec<Violation> = schema
            .iter_errors(&instance)
            .map(|err| {
                let path = err.instance_path.to_string();
                let message = err.to_string();
                Violation {
                    span: locate(content, &path),
                    path: if path.is_empty() { "/".to_string() } else { path },
                    message,
                }
            })
            .collect();

        if !violations.is_empty() {
            tracing::debug!(filename, count = violations.len(), "schema violations");
            return Err(ValidationError::Schema(SchemaViolations {
                filename: filename.to_string(),
                src: NamedSource::new(filename, content.to_string()),
                violations,
            }));
        }

        let shipment: Shipment = parse_yaml(content, filename)?;
        Ok(sanity_warnings(&shipment.inputs))
    }
}

/// Values the calculator accepts but that rarely make sense
pub fn sanity_warnings(inputs: &CostInputs) -> Vec<Warning> {
    let mut warnings = Vec::new();

    for (field, value) in inputs.numeric_fields() {
        if value < 0.0 {
            warnings.push(Warning {
                field: field.to_string(),
                message: format!("negative value {}", value),
            });
        }
    }

    if inputs.quantity == 0.0 {
        warnings.push(Warning {
            field: "quantity".to_string(),
            message: "zero quantity; cost per unit uses a single unit".to_string(),
        });
    }
    if inputs.exchange_rate == 0.0 {
        warnings.push(Warning {
            field: "exchange_rate".to_string(),
            message: "zero exchange rate; CIF in ETB will be zero".to_string(),
        });
    }
    if inputs.fob_usd == 0.0 {
        warnings.push(Warning {
            field: "fob_usd".to_string(),
            message: "zero FOB value; landed factor is undefined".to_string(),
        });
    }

    warnings
}

/// Best-effort span for the last key of a JSON pointer
fn locate(content: &str, pointer: &str) -> Option<SourceSpan> {
    let key = pointer.rsplit('/').find(|s| !s.is_empty())?;
    let needle = format!("{}:", key);
    for (idx, line) in content.lines().enumerate() {
        let trimmed = line.trim_start();
        if trimmed.starts_with(&needle) {
            let column = line.len() - trimmed.len() + 1;
            let offset = SourceOffset::from_location(content, idx + 1, column);
            return Some(SourceSpan::new(offset, line.trim().len()));
        }
    }
    None
}
