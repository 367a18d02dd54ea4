//! Error types for compose-file loading.
//!
//! Uses thiserror for derive macros. Every failure is terminal for the
//! current load and carries enough context (path, expected shape, actual
//! shape) to print a useful message without re-deriving anything.

use crate::decode::PolicyKind;
use crate::exit_codes;
use crate::schema::SchemaError;
use crate::version::SUPPORTED_VERSION;
use thiserror::Error;

/// Errors raised while turning raw input into a well-formed document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuralError {
    /// The document root is a scalar or a sequence.
    #[error("Top-level object must be a mapping")]
    NotAMapping,

    /// A mapping key somewhere in the document is not a string.
    ///
    /// `location` is either `at top level` or `in <path>`.
    #[error("Non-string key {location}: {key}")]
    NonStringKey { location: String, key: String },

    /// A section or entity that must be a mapping is something else.
    #[error("{path} must be a mapping, got {actual}")]
    NotAMappingAt { path: String, actual: &'static str },

    /// `ConfigDetails` carried no files.
    #[error("No files specified")]
    NoFiles,

    /// `ConfigDetails` carried more than one file.
    #[error("Multiple files are not yet supported")]
    MultipleFiles,
}

impl StructuralError {
    /// Build a `NonStringKey` error for a key found under `path`.
    ///
    /// An empty path means the key sits directly in the root mapping.
    pub fn non_string_key(path: &str, key: impl Into<String>) -> Self {
        let location = if path.is_empty() {
            "at top level".to_string()
        } else {
            format!("in {}", path)
        };
        StructuralError::NonStringKey {
            location,
            key: key.into(),
        }
    }
}

/// Main error type for compose-file operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The source text could not be parsed at all.
    #[error("failed to parse YAML: {0}")]
    Parse(String),

    /// The config file could not be read.
    #[error("{0}")]
    Io(String),

    /// The document shape is unusable before any decoding starts.
    #[error(transparent)]
    Structural(#[from] StructuralError),

    /// `version` is missing, or names a format this crate does not load.
    #[error("{}", unsupported_version_message(.found.as_deref()))]
    UnsupportedVersion { found: Option<String> },

    /// `version` is present but not written as a string.
    #[error("version must be a string, got {actual}")]
    InvalidVersionType { actual: &'static str },

    /// The external schema validator rejected the document.
    #[error("config is invalid: {}", join_schema_errors(.0))]
    SchemaValidation(Vec<SchemaError>),

    /// A field's value has the wrong kind for its policy.
    #[error("{path} must be {expected}, got {actual}")]
    TypeMismatch {
        path: String,
        policy: PolicyKind,
        expected: &'static str,
        actual: &'static str,
    },

    /// A shell command or byte size string could not be interpreted.
    #[error("{path}: invalid {policy} value {raw:?}: {reason}")]
    Coercion {
        path: String,
        policy: PolicyKind,
        raw: String,
        reason: String,
    },
}

impl ConfigError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            ConfigError::Parse(_) | ConfigError::Io(_) => exit_codes::USER_ERROR,
            ConfigError::Structural(_)
            | ConfigError::UnsupportedVersion { .. }
            | ConfigError::InvalidVersionType { .. } => exit_codes::STRUCTURE_FAILURE,
            ConfigError::SchemaValidation(_) => exit_codes::SCHEMA_FAILURE,
            ConfigError::TypeMismatch { .. } | ConfigError::Coercion { .. } => {
                exit_codes::DECODE_FAILURE
            }
        }
    }

    /// The document path the error points at, when it has one.
    pub fn path(&self) -> Option<&str> {
        match self {
            ConfigError::TypeMismatch { path, .. } | ConfigError::Coercion { path, .. } => {
                Some(path)
            }
            _ => None,
        }
    }
}

fn unsupported_version_message(found: Option<&str>) -> String {
    match found {
        Some(version) => format!(
            "Unsupported version: {:?}. The only supported version is {:?}",
            version, SUPPORTED_VERSION
        ),
        None => format!(
            "Missing version: files without a top-level version use the legacy format, \
             which is not supported. Add version: {:?}",
            SUPPORTED_VERSION
        ),
    }
}

fn join_schema_errors(errors: &[SchemaError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type alias for compose-file operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
