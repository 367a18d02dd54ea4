//! Coercion functions behind each scalar and list policy.
//!
//! Each takes the raw value and its document path, and either returns the
//! typed result or a `TypeMismatch`/`Coercion` error pointing at the path.

use super::{PolicyKind, mismatch, parse_byte_size};
use crate::document::{Value, child_path, index_path};
use crate::error::{ConfigError, Result};
use std::collections::BTreeMap;

pub fn string(value: &Value, path: &str) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        other => Err(mismatch(path, PolicyKind::String, "a string", other)),
    }
}

pub fn boolean(value: &Value, path: &str) -> Result<bool> {
    match value {
        Value::Bool(b) => Ok(*b),
        other => Err(mismatch(path, PolicyKind::Bool, "a boolean", other)),
    }
}

pub fn integer(value: &Value, path: &str) -> Result<i64> {
    match value {
        Value::Int(i) => Ok(*i),
        other => Err(mismatch(path, PolicyKind::Integer, "an integer", other)),
    }
}

pub fn string_list(value: &Value, path: &str) -> Result<Vec<String>> {
    strings_of(value, path, PolicyKind::StringList)
}

/// A lone string becomes a one-item list.
pub fn string_or_string_list(value: &Value, path: &str) -> Result<Vec<String>> {
    match value {
        Value::String(s) => Ok(vec![s.clone()]),
        Value::Sequence(_) => strings_of(value, path, PolicyKind::StringOrStringList),
        other => Err(mismatch(
            path,
            PolicyKind::StringOrStringList,
            "a string or a list of strings",
            other,
        )),
    }
}

/// Numbers are stringified with their default formatting (`80`, `2.5`).
pub fn number_or_string_list(value: &Value, path: &str) -> Result<Vec<String>> {
    let Value::Sequence(items) = value else {
        return Err(mismatch(
            path,
            PolicyKind::NumberOrStringList,
            "a list of strings or numbers",
            value,
        ));
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::String(s) => Ok(s.clone()),
            Value::Int(i) => Ok(i.to_string()),
            Value::Float(f) => Ok(f.to_string()),
            other => Err(mismatch(
                &index_path(path, index),
                PolicyKind::NumberOrStringList,
                "a string or a number",
                other,
            )),
        })
        .collect()
}

/// A string is split into words with POSIX shell quoting rules; a sequence
/// is taken as-is.
pub fn shell_command(value: &Value, path: &str) -> Result<Vec<String>> {
    match value {
        Value::String(command) => {
            shell_words::split(command).map_err(|e| ConfigError::Coercion {
                path: path.to_string(),
                policy: PolicyKind::ShellCommand,
                raw: command.clone(),
                reason: e.to_string(),
            })
        }
        Value::Sequence(_) => strings_of(value, path, PolicyKind::ShellCommand),
        other => Err(mismatch(
            path,
            PolicyKind::ShellCommand,
            "a string or a list of strings",
            other,
        )),
    }
}

pub fn byte_size(value: &Value, path: &str) -> Result<i64> {
    match value {
        Value::Int(bytes) => Ok(*bytes),
        Value::String(raw) => parse_byte_size(raw).map_err(|reason| ConfigError::Coercion {
            path: path.to_string(),
            policy: PolicyKind::ByteSize,
            raw: raw.clone(),
            reason,
        }),
        other => Err(mismatch(
            path,
            PolicyKind::ByteSize,
            "an integer or a size string",
            other,
        )),
    }
}

/// Accepts either form of a key/value collection:
///
/// ```text
/// environment:          environment:
///   FOO: "1"              - FOO=1
///   QUUX:                 - QUUX
/// ```
///
/// Null map values and list items without `sep` both yield an empty value.
pub fn mapping_or_list(value: &Value, sep: &str, path: &str) -> Result<BTreeMap<String, String>> {
    let mut result = BTreeMap::new();

    match value {
        Value::Mapping(mapping) => {
            for (key, item) in mapping.iter() {
                let text = item.scalar_to_string().ok_or_else(|| {
                    mismatch(
                        &child_path(path, key),
                        PolicyKind::MappingOrList,
                        "a string, number or null",
                        item,
                    )
                })?;
                result.insert(key.to_string(), text);
            }
        }
        Value::Sequence(items) => {
            for (index, item) in items.iter().enumerate() {
                let Value::String(entry) = item else {
                    return Err(mismatch(
                        &index_path(path, index),
                        PolicyKind::MappingOrList,
                        "a string",
                        item,
                    ));
                };
                let (key, text) = entry.split_once(sep).unwrap_or((entry.as_str(), ""));
                result.insert(key.to_string(), text.to_string());
            }
        }
        other => {
            return Err(mismatch(
                path,
                PolicyKind::MappingOrList,
                "a mapping or a list",
                other,
            ));
        }
    }

    Ok(result)
}

/// Collect a sequence whose items must all be strings.
fn strings_of(value: &Value, path: &str, policy: PolicyKind) -> Result<Vec<String>> {
    let Value::Sequence(items) = value else {
        return Err(mismatch(path, policy, "a list of strings", value));
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::String(s) => Ok(s.clone()),
            other => Err(mismatch(&index_path(path, index), policy, "a string", other)),
        })
        .collect()
}
