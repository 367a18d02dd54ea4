//! Schema validation boundary.
//!
//! The loader hands the normalized document to a [`SchemaValidator`] before
//! any entity is decoded, so shape mistakes are reported in the schema's own
//! words. The bundled implementation compiles the published v2.1 schema with
//! the `jsonschema` crate; callers may supply their own validator instead.

use crate::document::Mapping;
use crate::error::{ConfigError, Result};
use jsonschema::{Draft, Validator};
use std::fmt;
use std::sync::LazyLock;


/// The published schema for the supported format version.
const CONFIG_SCHEMA_V2_1: &str = include_str!("data/config_schema_v2.1.json");

/// Formats the schema declares but deliberately leaves unchecked.
///
/// Port and expose specifications are free-form strings here; their grammar
/// is not enforced at this stage.
const PERMISSIVE_FORMATS: &[&str] = &["ports", "expose"];

static BUNDLED_VALIDATOR: LazyLock<JsonSchemaValidator> = LazyLock::new(|| {
    let schema: serde_json::Value =
        serde_json::from_str(CONFIG_SCHEMA_V2_1).expect("Invalid bundled config schema JSON");
    JsonSchemaValidator::from_schema(&schema).expect("Invalid bundled config schema")
});

/// One violation reported by a schema validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaError {
    /// Dotted document path of the offending value (empty for the root).
    pub path: String,
    /// The validator's message.
    pub message: String,
}

impl SchemaError {
    /// Create an error from a JSON pointer (`/services/foo/ports/0`) and a message.
    pub fn new(pointer: &str, message: impl Into<String>) -> Self {
        Self {
            path: pointer_to_path(pointer),
            message: message.into(),
        }
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Validates a normalized document against a published schema.
pub trait SchemaValidator {
    /// Check the whole document, returning every violation found.
    fn validate(&self, document: &Mapping) -> std::result::Result<(), Vec<SchemaError>>;
}

/// Validator backed by the bundled v2.1 JSON schema.
pub struct JsonSchemaValidator {
    validator: Validator,
}

impl fmt::Debug for JsonSchemaValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonSchemaValidator").finish_non_exhaustive()
    }
}

impl JsonSchemaValidator {
    /// The bundled v2.1 schema, compiled on first use.
    pub fn bundled() -> &'static Self {
        &BUNDLED_VALIDATOR
    }

    /// Compile an arbitrary draft-07 schema.
    pub fn from_schema(schema: &serde_json::Value) -> Result<Self> {
        let mut options = jsonschema::options().with_draft(Draft::Draft7);
        for format in PERMISSIVE_FORMATS {
            options = options.with_format(*format, accept_any);
        }
        let validator = options.build(schema).map_err(|e| {
            ConfigError::SchemaValidation(vec![SchemaError::new(
                "",
                format!("failed to compile schema: {}", e),
            )])
        })?;
        Ok(Self { validator })
    }
}

impl SchemaValidator for JsonSchemaValidator {
    fn validate(&self, document: &Mapping) -> std::result::Result<(), Vec<SchemaError>> {
        let instance = document.to_json();
        let errors: Vec<SchemaError> = self
            .validator
            .iter_errors(&instance)
            .map(|e| SchemaError::new(&e.instance_path.to_string(), e.to_string()))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            tracing::debug!(count = errors.len(), "schema validation failed");
            Err(errors)
        }
    }
}

/// Validator that accepts every document.
///
/// For callers that have already validated the document elsewhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl SchemaValidator for AcceptAll {
    fn validate(&self, _document: &Mapping) -> std::result::Result<(), Vec<SchemaError>> {
        Ok(())
    }
}

fn accept_any(_value: &str) -> bool {
    true
}

/// Turn a JSON pointer into the dotted/bracketed form used in diagnostics.
fn pointer_to_path(pointer: &str) -> String {
    let mut path = String::new();
    for segment in pointer.split('/').skip(1) {
        let segment = segment.replace("~1", "/").replace("~0", "~");
        if !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()) {
            path.push_str(&format!("[{}]", segment));
        } else if path.is_empty() {
            path.push_str(&segment);
        } else {
            path.push('.');
            path.push_str(&segment);
        }
    }
    path
}
