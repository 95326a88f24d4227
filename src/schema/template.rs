//! Template generation for new shipment files

use chrono::{DateTime, Utc};
use rust_embed::Embed;
use tera::Tera;
use thiserror::Error;

use crate::core::identity::ShipmentId;
use crate::core::landed_cost::CostInputs;

#[derive(Embed)]
#[folder = "templates/"]
struct EmbeddedTemplates;

const SHIPMENT_TEMPLATE: &str = "shipment.yaml.tera";

/// Context for template generation
#[derive(Debug, Clone)]
pub struct TemplateContext {
    pub id: ShipmentId,
    pub author: String,
    pub created: DateTime<Utc>,
    pub title: String,
    pub supplier: Option<String>,
    pub filename: String,
    pub inputs: CostInputs,
}

impl TemplateContext {
    pub fn new(title: impl Into<String>, author: impl Into<String>, inputs: CostInputs) -> Self {
        Self {
            id: ShipmentId::new(),
            author: author.into(),
            created: Utc::now(),
            title: title.into(),
            supplier: None,
            filename: String::new(),
            inputs,
        }
    }

    pub fn with_supplier(mut self, supplier: impl Into<String>) -> Self {
        self.supplier = Some(supplier.into());
        self
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }
}

/// Template generator using Tera
pub struct TemplateGenerator {
    tera: Tera,
}

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Template rendering error: {0}")]
    RenderError(String),
}

/// Quote a string as a YAML double-quoted scalar (JSON strings are valid YAML)
fn yaml_str(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string())
}

impl TemplateGenerator {
    /// Create a new template generator with embedded templates
    pub fn new() -> Result<Self, TemplateError> {
        let mut tera = Tera::default();

        for file in EmbeddedTemplates::iter() {
            let filename = file.as_ref();
            if let Some(content) = EmbeddedTemplates::get(filename) {
                if let Ok(template_str) = std::str::from_utf8(&content.data) {
                    tera.add_raw_template(filename, template_str)
                        .map_err(|e| TemplateError::RenderError(e.to_string()))?;
                }
            }
        }

        Ok(Self { tera })
    }

    /// Generate a shipment file
    pub fn generate_shipment(&self, ctx: &TemplateContext) -> Result<String, TemplateError> {
        if !self.tera.get_template_names().any(|n| n == SHIPMENT_TEMPLATE) {
            return Err(TemplateError::NotFound(SHIPMENT_TEMPLATE.to_string()));
        }

        let inputs = &ctx.inputs;
        let mut context = tera::Context::new();
        context.insert("id", &ctx.id.to_string());
        context.insert("author", &yaml_str(&ctx.author));
        context.insert("created", &ctx.created.to_rfc3339());
        context.insert("title", &yaml_str(&ctx.title));
        context.insert("title_plain", &ctx.title.replace(['\n', '\r'], " "));
        context.insert("supplier", &ctx.supplier.as_deref().map(yaml_str));
        context.insert("filename", &ctx.filename);
        context.insert("item_name", &yaml_str(&inputs.item_name));
        context.insert("hs_code", &yaml_str(&inputs.hs_code));
        context.insert("unit", &yaml_str(&inputs.unit));
        for (field, value) in inputs.numeric_fields() {
            context.insert(field, &value);
        }

        self.tera
            .render(SHIPMENT_TEMPLATE, &context)
            .map_err(|e| TemplateError::RenderError(e.to_string()))
    }
}
