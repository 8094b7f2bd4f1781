//! Hex validation and normalization shared by the record builder
//! and the event entry points.
//!
//! Payloads arrive either as raw bytes or as quoted hex literals of the
//! form `h'deadbeef'`; event subjects arrive as `0x`-prefixed hex that may
//! have lost a leading zero nibble. Everything here is pure string work.

use crate::domain::errors::DomainError;
use once_cell::sync::Lazy;
use regex::Regex;

/// Cached regex patterns for common validations
static HEX_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9a-fA-F]+$").expect("Invalid hex regex"));

const QUOTE_PREFIX: &str = "h'";
const QUOTE_SUFFIX: char = '\'';
const HEX_PREFIX: &str = "0x";

/// Validation result type
pub type ValidationResult<T> = Result<T, DomainError>;

/// Common validation utilities
pub struct Validation;

impl Validation {
    /// Validate that a string is a non-empty run of hex digits (either case)
    pub fn validate_hex(value: &str, field_name: &str) -> ValidationResult<()> {
        if value.is_empty() {
            return Err(DomainError::ValidationError {
                field: field_name.to_string(),
                message: "Hex value cannot be empty".to_string(),
            });
        }

        if !HEX_REGEX.is_match(value) {
            return Err(DomainError::ValidationError {
                field: field_name.to_string(),
                message: format!("Invalid hex characters in '{}'", value),
            });
        }

        Ok(())
    }


    /// Strip the `h'` prefix and the closing `'`, at most once each.
    ///
    /// The two markers are handled independently, so a literal missing its
    /// closing quote still loses its prefix. The hex check that follows is
    /// what rejects anything left over.
    pub fn strip_hex_quotes(value: &str) -> &str {
        let value = value.strip_prefix(QUOTE_PREFIX).unwrap_or(value);
        value.strip_suffix(QUOTE_SUFFIX).unwrap_or(value)
    }

    /// Pad odd-length hex with a single leading zero nibble, keeping an
    /// optional `0x` prefix in place.
    pub fn normalize_even_length(value: &str) -> String {
        let (prefix, digits) = match value.strip_prefix(HEX_PREFIX) {
            Some(digits) => (HEX_PREFIX, digits),
            None => ("", value),
        };

        if digits.len() % 2 == 1 {
            format!("{}0{}", prefix, digits)
        } else {
            value.to_string()
        }
    }

    /// Decode a bare hex string into bytes, padding odd lengths first
    pub fn decode_hex(value: &str, field_name: &str) -> ValidationResult<Vec<u8>> {
        Self::validate_hex(value, field_name)?;

        let normalized = Self::normalize_even_length(value);
        hex::decode(&normalized).map_err(|e| DomainError::ValidationError {
            field: field_name.to_string(),
            message: e.to_string(),
        })
    }

    /// Decode an `h'...'` literal (quotes optional) into bytes
    pub fn decode_quoted_hex(value: &str, field_name: &str) -> ValidationResult<Vec<u8>> {
        Self::decode_hex(Self::strip_hex_quotes(value), field_name)
    }
}
