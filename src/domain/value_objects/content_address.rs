use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Keccak-256 content address (32 bytes = 64 hex chars)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContentAddress(String);

impl ContentAddress {
    /// Create from validated hex string, with or without `0x`
    pub fn from_hex(hex: String) -> Result<Self, DomainError> {
        let digits = hex.strip_prefix("0x").unwrap_or(&hex);

        if digits.len() != 64 {
            return Err(DomainError::ContentAddressMismatch {
                expected: "64 hex characters".to_string(),
                actual: format!("{} characters", digits.len()),
            });
        }

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(DomainError::ContentAddressMismatch {
                expected: "hex characters only".to_string(),
                actual: hex,
            });
        }

        Ok(Self(digits.to_lowercase()))
    }

    /// Wrap a finished digest
    pub fn from_digest(digest: [u8; 32]) -> Self {
        Self(hex::encode(digest))
    }

    /// Get hex string representation
    pub fn as_hex(&self) -> &str {
        &self.0
    }

    /// Hex with `0x`, the form entity IDs take in the host store
    pub fn to_prefixed_hex(&self) -> String {
        format!("0x{}", self.0)
    }
}

impl std::fmt::Display for ContentAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ContentAddress {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_content_address_from_hex_valid() {
        let hex = "a".repeat(64);
        let address = ContentAddress::from_hex(hex.clone()).unwrap();
        assert_eq!(address.as_hex(), hex);
    }

    #[test]
    fn test_content_address_accepts_prefix_and_uppercase() {
        let address = ContentAddress::from_hex(format!("0x{}", "AB".repeat(32))).unwrap();
        assert_eq!(address.as_hex(), "ab".repeat(32));
    }

    #[test]
    fn test_content_address_from_hex_invalid_length() {
        let err = ContentAddress::from_hex("a".repeat(63)).unwrap_err();
        assert!(matches!(err, DomainError::ContentAddressMismatch { .. }));
    }

    #[test]
    fn test_content_address_from_hex_invalid_chars() {
        let err = ContentAddress::from_hex("g".repeat(64)).unwrap_err();
        assert!(matches!(err, DomainError::ContentAddressMismatch { .. }));
    }

    #[test]
    fn test_content_address_from_digest() {
        let address = ContentAddress::from_digest([0xff; 32]);
        assert_eq!(address.as_hex(), "ff".repeat(32));
        assert_eq!(address.to_prefixed_hex(), format!("0x{}", "ff".repeat(32)));
    }

    #[test]
    fn test_content_address_display_and_parse() {
        let hex = "c".repeat(64);
        let address = ContentAddress::from_str(&hex).unwrap();
        assert_eq!(format!("{}", address), hex);
    }
}
