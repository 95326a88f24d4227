//! YAML error types with source-annotated diagnostics

use miette::{Diagnostic, NamedSource, SourceOffset, SourceSpan};
use thiserror::Error;

/// A YAML syntax or shape error pointing at the offending location
#[derive(Debug, Error, Diagnostic)]
#[error("Invalid YAML in {filename}: {message}")]
#[diagnostic(
    code(lce::yaml::syntax),
    help("Check indentation, and that numeric fields hold plain numbers")
)]
pub struct YamlSyntaxError {
    pub filename: String,
    pub message: String,

    #[source_code]
    pub src: NamedSource<String>,

    #[label("here")]
    pub span: Option<SourceSpan>,

    /// 1-based line of the error, when known
    pub line: Option<usize>,
}

impl YamlSyntaxError {
    /// Build from a serde_yml error, locating the span when it is known
    pub fn from_serde_error(err: &serde_yml::Error, content: &str, filename: &str) -> Self {
        let location = err.location();
        let span = location.as_ref().map(|loc| {
            let offset = SourceOffset::from_location(content, loc.line(), loc.column());
            SourceSpan::new(offset, 1)
        });

        Self {
            filename: filename.to_string(),
            message: strip_location(&err.to_string()),
            src: NamedSource::new(filename, content.to_string()),
            span,
            line: location.map(|loc| loc.line()),
        }
    }
}

/// serde_yml appends " at line X column Y"; the span already shows that
fn strip_location(message: &str) -> String {
    match message.find(" at line ") {
        Some(idx) => message[..idx].to_string(),
        None => message.to_string(),
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum YamlError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(YamlSyntaxError),

    #[error("Failed to read file: {0}")]
    #[diagnostic(code(lce::yaml::io))]
    Io(#[from] std::io::Error),
}
