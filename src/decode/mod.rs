//! Generic, table-driven record decoder.
//!
//! Each record type declares a static table of [`Field`]s: a logical name
//! (from which the document key is derived), and a [`Policy`] saying how the
//! raw document value is coerced and where the result is stored. One generic
//! function, [`decode`], walks the table against a normalized mapping.
//!
//! # Decoding rules
//!
//! - A key absent from the mapping leaves the field at its default value.
//! - A present key is dispatched to its policy; the first violation aborts
//!   the whole record with a single error naming the field's document path.
//! - Nested records (`NestedStruct`, `ListOfStructs`, `ListOrStructMap`)
//!   recurse into this same engine.
//!
//! Policies carry typed setters, so a table can only pair a policy with a
//! field of the matching Rust type. There is no "unknown policy" at runtime.

mod naming;
mod policies;
mod units;

#[cfg(test)]
mod tests;

pub use naming::document_key;
pub use policies::{
    boolean, byte_size, integer, mapping_or_list, number_or_string_list, shell_command, string,
    string_list, string_or_string_list,
};
pub use units::parse_byte_size;

use crate::document::{Mapping, Value, child_path, index_path};
use crate::error::{ConfigError, Result};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

/// Stores a nested decode result on the parent record.
///
/// Receives the raw value and its document path; implementations call one
/// of [`decode_nested`], [`decode_list_of_structs`] or [`decode_struct_map`].
pub type NestedSetter<T> = fn(&mut T, &Value, &str) -> Result<()>;

/// Coercion rule for one field, carrying the setter for its result.
pub enum Policy<T> {
    /// A plain string.
    String(fn(&mut T, String)),
    /// A plain boolean.
    Bool(fn(&mut T, bool)),
    /// A plain integer.
    Integer(fn(&mut T, i64)),
    /// A sequence of strings.
    StringList(fn(&mut T, Vec<String>)),
    /// A string (becoming a one-item list) or a sequence of strings.
    StringOrStringList(fn(&mut T, Vec<String>)),
    /// A sequence of strings and numbers, numbers stringified.
    NumberOrStringList(fn(&mut T, Vec<String>)),
    /// A shell-split string, or a sequence of strings taken verbatim.
    ShellCommand(fn(&mut T, Vec<String>)),
    /// An integer, or a human-readable size such as `512m`.
    ByteSize(fn(&mut T, i64)),
    /// A mapping of scalars, or a list of `KEY<sep>VALUE` strings.
    MappingOrList(&'static str, fn(&mut T, BTreeMap<String, String>)),
    /// A list of bare names, or a mapping of name to record-or-null.
    ListOrStructMap(NestedSetter<T>),
    /// A sequence of records.
    ListOfStructs(NestedSetter<T>),
    /// A single nested record.
    NestedStruct(NestedSetter<T>),
    /// Handled by the caller after the generic pass.
    Skip,
}

impl<T> Policy<T> {
    pub fn kind(&self) -> PolicyKind {
        match self {
            Policy::String(_) => PolicyKind::String,
            Policy::Bool(_) => PolicyKind::Bool,
            Policy::Integer(_) => PolicyKind::Integer,
            Policy::StringList(_) => PolicyKind::StringList,
            Policy::StringOrStringList(_) => PolicyKind::StringOrStringList,
            Policy::NumberOrStringList(_) => PolicyKind::NumberOrStringList,
            Policy::ShellCommand(_) => PolicyKind::ShellCommand,
            Policy::ByteSize(_) => PolicyKind::ByteSize,
            Policy::MappingOrList(_, _) => PolicyKind::MappingOrList,
            Policy::ListOrStructMap(_) => PolicyKind::ListOrStructMap,
            Policy::ListOfStructs(_) => PolicyKind::ListOfStructs,
            Policy::NestedStruct(_) => PolicyKind::NestedStruct,
            Policy::Skip => PolicyKind::Skip,
        }
    }
}

/// Setter-free name of a policy, carried by errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyKind {
    String,
    Bool,
    Integer,
    StringList,
    StringOrStringList,
    NumberOrStringList,
    ShellCommand,
    ByteSize,
    MappingOrList,
    ListOrStructMap,
    ListOfStructs,
    NestedStruct,
    Skip,
}

impl PolicyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyKind::String => "string",
            PolicyKind::Bool => "boolean",
            PolicyKind::Integer => "integer",
            PolicyKind::StringList => "string list",
            PolicyKind::StringOrStringList => "string or string list",
            PolicyKind::NumberOrStringList => "number or string list",
            PolicyKind::ShellCommand => "shell command",
            PolicyKind::ByteSize => "byte size",
            PolicyKind::MappingOrList => "mapping or list",
            PolicyKind::ListOrStructMap => "list or struct map",
            PolicyKind::ListOfStructs => "list of structs",
            PolicyKind::NestedStruct => "nested struct",
            PolicyKind::Skip => "skip",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a record's field table.
pub struct Field<T> {
    /// Logical field name in `UpperCamelCase`.
    pub name: &'static str,
    /// Explicit document key, for names the derivation would get wrong.
    pub key: Option<&'static str>,
    pub policy: Policy<T>,
}

impl<T> Field<T> {
    /// A field whose document key is derived from its name.
    pub const fn new(name: &'static str, policy: Policy<T>) -> Self {
        Self {
            name,
            key: None,
            policy,
        }
    }

    /// A field with an explicit document key.
    pub const fn keyed(name: &'static str, key: &'static str, policy: Policy<T>) -> Self {
        Self {
            name,
            key: Some(key),
            policy,
        }
    }

    /// The key this field is read from.
    pub fn document_key(&self) -> Cow<'static, str> {
        match self.key {
            Some(key) => Cow::Borrowed(key),
            None => Cow::Owned(document_key(self.name)),
        }
    }
}

/// A record type decodable from a mapping.
///
/// `Default` supplies the zero value that absent keys leave in place.
pub trait Record: Default + 'static {
    /// The record's field table, in declaration order.
    const FIELDS: &'static [Field<Self>];
}

/// Decode a record from `mapping`, which sits at `path` in the document.
pub fn decode<T: Record>(mapping: &Mapping, path: &str) -> Result<T> {
    let mut record = T::default();

    for field in T::FIELDS {
        let key = field.document_key();
        let Some(value) = mapping.get(&key) else {
            continue;
        };
        let field_path = child_path(path, &key);
        tracing::trace!(path = %field_path, policy = %field.policy.kind(), "decoding field");
        apply(&mut record, &field.policy, value, &field_path)?;
    }

    Ok(record)
}

/// Run one policy against one value and store the result.
fn apply<T>(record: &mut T, policy: &Policy<T>, value: &Value, path: &str) -> Result<()> {
    match policy {
        Policy::String(set) => set(record, string(value, path)?),
        Policy::Bool(set) => set(record, boolean(value, path)?),
        Policy::Integer(set) => set(record, integer(value, path)?),
        Policy::StringList(set) => set(record, string_list(value, path)?),
        Policy::StringOrStringList(set) => set(record, string_or_string_list(value, path)?),
        Policy::NumberOrStringList(set) => set(record, number_or_string_list(value, path)?),
        Policy::ShellCommand(set) => set(record, shell_command(value, path)?),
        Policy::ByteSize(set) => set(record, byte_size(value, path)?),
        Policy::MappingOrList(sep, set) => set(record, mapping_or_list(value, sep, path)?),
        Policy::ListOrStructMap(set) | Policy::ListOfStructs(set) | Policy::NestedStruct(set) => {
            set(record, value, path)?
        }
        Policy::Skip => {}
    }
    Ok(())
}

/// Decode a single nested record (the `NestedStruct` policy).
pub fn decode_nested<U: Record>(value: &Value, path: &str) -> Result<U> {
    match value {
        Value::Mapping(mapping) => decode(mapping, path),
        other => Err(mismatch(path, PolicyKind::NestedStruct, "a mapping", other)),
    }
}

/// Decode a sequence of records (the `ListOfStructs` policy).
pub fn decode_list_of_structs<U: Record>(value: &Value, path: &str) -> Result<Vec<U>> {
    let Value::Sequence(items) = value else {
        return Err(mismatch(
            path,
            PolicyKind::ListOfStructs,
            "a list of mappings",
            value,
        ));
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let item_path = index_path(path, index);
            match item {
                Value::Mapping(mapping) => decode(mapping, &item_path),
                other => Err(mismatch(
                    &item_path,
                    PolicyKind::ListOfStructs,
                    "a mapping",
                    other,
                )),
            }
        })
        .collect()
}

/// Decode a list of names or a name-keyed map of records (the
/// `ListOrStructMap` policy).
///
/// Bare names and null entries produce default records.
pub fn decode_struct_map<U: Record>(value: &Value, path: &str) -> Result<BTreeMap<String, U>> {
    let mut result = BTreeMap::new();

    match value {
        Value::Sequence(items) => {
            for (index, item) in items.iter().enumerate() {
                match item {
                    Value::String(name) => {
                        result.insert(name.clone(), U::default());
                    }
                    other => {
                        return Err(mismatch(
                            &index_path(path, index),
                            PolicyKind::ListOrStructMap,
                            "a string",
                            other,
                        ));
                    }
                }
            }
        }
        Value::Mapping(mapping) => {
            for (name, item) in mapping.iter() {
                let item_path = child_path(path, name);
                let record = match item {
                    Value::Null => U::default(),
                    Value::Mapping(inner) => decode(inner, &item_path)?,
                    other => {
                        return Err(mismatch(
                            &item_path,
                            PolicyKind::ListOrStructMap,
                            "a mapping or null",
                            other,
                        ));
                    }
                };
                result.insert(name.to_string(), record);
            }
        }
        other => {
            return Err(mismatch(
                path,
                PolicyKind::ListOrStructMap,
                "a list or a mapping",
                other,
            ));
        }
    }

    Ok(result)
}

/// Build a `TypeMismatch` error for `value` found at `path`.
pub fn mismatch(
    path: &str,
    policy: PolicyKind,
    expected: &'static str,
    value: &Value,
) -> ConfigError {
    ConfigError::TypeMismatch {
        path: path.to_string(),
        policy,
        expected,
        actual: value.kind(),
    }
}
