//! Per-resource ulimits.

use crate::decode::{PolicyKind, integer, mismatch};
use crate::document::{Value, child_path};
use crate::error::Result;
use crate::types::UlimitsConfig;
use std::collections::BTreeMap;

/// Decode a `ulimits` mapping.
///
/// Each entry is either a single integer (soft and hard limits equal) or a
/// mapping with integer `soft` and `hard` keys.
pub fn load_ulimits(value: &Value, path: &str) -> Result<BTreeMap<String, UlimitsConfig>> {
    let Value::Mapping(entries) = value else {
        return Err(mismatch(path, PolicyKind::Skip, "a mapping", value));
    };

    let mut ulimits = BTreeMap::new();
    for (resource, limit) in entries.iter() {
        let limit_path = child_path(path, resource);
        let config = match limit {
            Value::Int(single) => UlimitsConfig::Single(*single),
            Value::Mapping(pair) => UlimitsConfig::SoftHard {
                soft: bound(pair.get("soft"), &child_path(&limit_path, "soft"))?,
                hard: bound(pair.get("hard"), &child_path(&limit_path, "hard"))?,
            },
            other => {
                return Err(mismatch(
                    &limit_path,
                    PolicyKind::Skip,
                    "an integer or a mapping",
                    other,
                ));
            }
        };
        ulimits.insert(resource.to_string(), config);
    }
    Ok(ulimits)
}

fn bound(value: Option<&Value>, path: &str) -> Result<i64> {
    integer(value.unwrap_or(&Value::Null), path)
}
