//! Conversion from the YAML parser's raw tree into the canonical model.

use super::{Mapping, Value, child_path, index_path};
use crate::error::{ConfigError, Result, StructuralError};
use serde_yaml::Value as RawValue;

/// Parse YAML source and normalize it into a root mapping.
///
/// # Returns
///
/// * `Ok(Mapping)` - The normalized root mapping
/// * `Err(ConfigError::Parse)` - The text is not valid YAML
/// * `Err(ConfigError::Structural)` - The root is not a mapping, or a key is not a string
pub fn parse_yaml(source: &str) -> Result<Mapping> {
    let raw: RawValue =
        serde_yaml::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))?;
    Ok(normalize_root(&raw)?)
}

/// Normalize a raw document whose root must be a mapping.
pub fn normalize_root(raw: &RawValue) -> std::result::Result<Mapping, StructuralError> {
    match normalize(raw, "")? {
        Value::Mapping(mapping) => {
            tracing::debug!(keys = mapping.len(), "document normalized");
            Ok(mapping)
        }
        _ => Err(StructuralError::NotAMapping),
    }
}

/// Normalize a raw value found at `path`.
///
/// Mapping keys must be strings at every depth; the first offending key is
/// reported with the path of the mapping that holds it. Sequence order and
/// mapping entry order are kept as parsed.
pub fn normalize(raw: &RawValue, path: &str) -> std::result::Result<Value, StructuralError> {
    match raw {
        RawValue::Null => Ok(Value::Null),
        RawValue::Bool(b) => Ok(Value::Bool(*b)),
        RawValue::Number(n) => Ok(match n.as_i64() {
            Some(i) => Value::Int(i),
            // Integers beyond i64 and all fractional numbers.
            None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        }),
        RawValue::String(s) => Ok(Value::String(s.clone())),
        RawValue::Sequence(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| normalize(item, &index_path(path, index)))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map(Value::Sequence),
        RawValue::Mapping(raw_mapping) => {
            let mut mapping = Mapping::new();
            for (key, entry) in raw_mapping {
                let key = match key {
                    RawValue::String(s) => s,
                    other => return Err(StructuralError::non_string_key(path, describe_key(other))),
                };
                let value = normalize(entry, &child_path(path, key))?;
                mapping.insert(key.clone(), value);
            }
            Ok(Value::Mapping(mapping))
        }
        // Explicit tags carry no meaning for this format.
        RawValue::Tagged(tagged) => normalize(&tagged.value, path),
    }
}

/// Printed form of a rejected key.
fn describe_key(key: &RawValue) -> String {
    match key {
        RawValue::Null => "null".to_string(),
        RawValue::Bool(b) => b.to_string(),
        RawValue::Number(n) => n.to_string(),
        RawValue::String(s) => format!("{:?}", s),
        RawValue::Tagged(tagged) => describe_key(&tagged.value),
        RawValue::Sequence(_) | RawValue::Mapping(_) => serde_yaml::to_string(key)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_else(|_| "<complex key>".to_string()),
    }
}
