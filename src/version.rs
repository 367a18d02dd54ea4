//! Format version gate.
//!
//! The declared version is checked before anything else looks at the
//! document's entities. It must be written as quoted text and must match
//! the supported version exactly; a missing version means the legacy
//! unversioned format, which is rejected outright.

use crate::document::{Mapping, Value};
use crate::error::{ConfigError, Result};

/// The only file format version this crate loads.
pub const SUPPORTED_VERSION: &str = "2.1";

/// Check the root mapping's `version` entry.
pub fn check_version(root: &Mapping) -> Result<()> {
    match root.get("version") {
        None => Err(ConfigError::UnsupportedVersion { found: None }),
        Some(Value::String(version)) if version == SUPPORTED_VERSION => {
            tracing::debug!(version = %version, "version accepted");
            Ok(())
        }
        Some(Value::String(version)) => Err(ConfigError::UnsupportedVersion {
            found: Some(version.clone()),
        }),
        Some(other) => Err(ConfigError::InvalidVersionType {
            actual: other.kind(),
        }),
    }
}
