//! Field name to document key derivation.

use regex::Regex;
use std::sync::LazyLock;

/// One capitalized word of an `UpperCamelCase` field name.
static NAME_SEGMENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z][a-z0-9]+").expect("Invalid name segment regex"));

/// Derive the document key for a logical field name.
///
/// The name is split into capitalized words, each lowercased, and joined with
/// `_`: `ContainerName` becomes `container_name`, `Ipv4Address` becomes
/// `ipv4_address`. Names with no such words (all lowercase, or all capitals)
/// are simply lowercased.
pub fn document_key(name: &str) -> String {
    let segments: Vec<String> = NAME_SEGMENT_REGEX
        .find_iter(name)
        .map(|m| m.as_str().to_lowercase())
        .collect();

    if segments.is_empty() {
        name.to_lowercase()
    } else {
        segments.join("_")
    }
}
