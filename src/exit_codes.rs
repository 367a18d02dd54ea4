//! Exit code constants for the compose-file CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, unreadable or unparsable file)
//! - 2: Structural failure (non-mapping document, non-string key, version)
//! - 3: Schema validation failure
//! - 4: Field decode failure (type mismatch, coercion)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, unreadable file, or YAML syntax error.
pub const USER_ERROR: i32 = 1;

/// Structural failure: document shape, non-string keys, file count, or version.
pub const STRUCTURE_FAILURE: i32 = 2;

/// Schema validation failure: the document does not match the published schema.
pub const SCHEMA_FAILURE: i32 = 3;

/// Decode failure: a field value could not be coerced to its declared type.
pub const DECODE_FAILURE: i32 = 4;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [
            SUCCESS,
            USER_ERROR,
            STRUCTURE_FAILURE,
            SCHEMA_FAILURE,
            DECODE_FAILURE,
        ];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }

    #[test]
    fn success_is_zero() {
        assert_eq!(SUCCESS, 0);
    }
}
