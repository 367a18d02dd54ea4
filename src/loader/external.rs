//! `external` on networks and volumes.

use crate::decode::{PolicyKind, mismatch};
use crate::document::{Value, child_path};
use crate::error::Result;

/// Resolve the `external` field of the resource named `resource`.
///
/// `true` refers to a pre-existing resource with the same name, `false`
/// means "managed" (empty name), and `{name: X}` refers to `X`.
pub fn load_external_name(resource: &str, value: &Value, path: &str) -> Result<String> {
    match value {
        Value::Bool(true) => Ok(resource.to_string()),
        Value::Bool(false) => Ok(String::new()),
        Value::Mapping(mapping) => {
            let name_path = child_path(path, "name");
            match mapping.get("name") {
                Some(Value::String(name)) => Ok(name.clone()),
                Some(other) => Err(mismatch(&name_path, PolicyKind::Skip, "a string", other)),
                None => Err(mismatch(&name_path, PolicyKind::Skip, "a string", &Value::Null)),
            }
        }
        other => Err(mismatch(
            path,
            PolicyKind::Skip,
            "a boolean or a mapping",
            other,
        )),
    }
}
