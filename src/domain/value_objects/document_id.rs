use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;
use crate::domain::value_objects::ContentAddress;

/// Identifier of the document a content entry was seen in.
///
/// Opaque to the store: the event entry point derives it from the content
/// address of the meta bytes, while hosts may pass any context-derived
/// string such as a transaction hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(DomainError::InvalidDocumentId(
                "document ID cannot be empty".to_string(),
            ));
        }
        Ok(Self(id))
    }

    pub fn from_content_address(address: &ContentAddress) -> Self {
        Self(address.to_prefixed_hex())
    }

    /// `0x`-prefixed hex of an opaque context value (e.g. a transaction hash)
    pub fn from_context_bytes(context: &[u8]) -> Result<Self, DomainError> {
        if context.is_empty() {
            return Err(DomainError::InvalidDocumentId(
                "document context cannot be empty".to_string(),
            ));
        }
        Ok(Self(format!("0x{}", hex::encode(context))))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for DocumentId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
