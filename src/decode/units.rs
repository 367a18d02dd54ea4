//! Human-readable byte size parsing.

use regex::Regex;
use std::sync::LazyLock;

/// `<number>[ ][k|m|g|t|p][i][b]`, case-insensitive units.
static SIZE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+(?:\.\d+)?) ?([kKmMgGtTpP])?[iI]?[bB]?$").expect("Invalid size regex")
});

/// Parse a size such as `512`, `512b`, `64k`, `1.5gb` or `2GiB` into bytes.
///
/// Every unit is a binary multiple: `k`, `kb` and `kib` all mean 1024.
///
/// # Returns
///
/// * `Ok(i64)` - The size in bytes (fractions are truncated)
/// * `Err(String)` - Why the input is not a size
pub fn parse_byte_size(raw: &str) -> Result<i64, String> {
    let captures = SIZE_REGEX
        .captures(raw)
        .ok_or_else(|| "expected a number with an optional unit (b, k, m, g, t, p)".to_string())?;

    let number: f64 = captures[1]
        .parse()
        .map_err(|e| format!("invalid number: {}", e))?;

    let exponent = match captures.get(2).map(|m| m.as_str().to_ascii_lowercase()) {
        None => 0,
        Some(unit) => match unit.as_str() {
            "k" => 1,
            "m" => 2,
            "g" => 3,
            "t" => 4,
            _ => 5,
        },
    };

    let bytes = number * 1024f64.powi(exponent);
    if bytes >= i64::MAX as f64 {
        return Err("size is too large".to_string());
    }

    Ok(bytes as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_numbers_are_bytes() {
        assert_eq!(parse_byte_size("0"), Ok(0));
        assert_eq!(parse_byte_size("512"), Ok(512));
        assert_eq!(parse_byte_size("512b"), Ok(512));
        assert_eq!(parse_byte_size("512B"), Ok(512));
    }

    #[test]
    fn unit_suffixes_are_binary() {
        assert_eq!(parse_byte_size("1k"), Ok(1024));
        assert_eq!(parse_byte_size("1kb"), Ok(1024));
        assert_eq!(parse_byte_size("1KiB"), Ok(1024));
        assert_eq!(parse_byte_size("64m"), Ok(64 * 1024 * 1024));
        assert_eq!(parse_byte_size("1mib"), Ok(1024 * 1024));
        assert_eq!(parse_byte_size("2gb"), Ok(2 * 1024 * 1024 * 1024));
        assert_eq!(parse_byte_size("1GiB"), Ok(1024 * 1024 * 1024));
        assert_eq!(parse_byte_size("1t"), Ok(1 << 40));
        assert_eq!(parse_byte_size("1p"), Ok(1 << 50));
    }

    #[test]
    fn fractions_and_spaces() {
        assert_eq!(parse_byte_size("1.5k"), Ok(1536));
        assert_eq!(parse_byte_size("10 mb"), Ok(10 * 1024 * 1024));
    }

    #[test]
    fn malformed_sizes_are_rejected() {
        for raw in ["", "abc", "-1", "12x", "1.2.3k", "k", "1 k b c", "1e6"] {
            assert!(parse_byte_size(raw).is_err(), "{:?} should not parse", raw);
        }
    }

    #[test]
    fn overflow_is_rejected() {
        assert!(parse_byte_size("99999999p").is_err());
    }
}
