use serde::{Deserialize, Serialize};

use crate::domain::value_objects::MagicNumber;

/// One validated content item from a Rain meta document.
///
/// Absent optional fields are empty strings, never placeholders. Fields are
/// hashed as a plain concatenation, so distinct records can share a content
/// address (payload `01` with magic `0x0207` and payload `0102` with magic
/// `7`); the first one stored under an address is the one kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaRecord {
    payload: Vec<u8>,
    magic_number: MagicNumber,
    content_type: String,
    content_encoding: String,
    content_language: String,
}

impl MetaRecord {
    pub fn new(
        payload: Vec<u8>,
        magic_number: MagicNumber,
        content_type: String,
        content_encoding: String,
        content_language: String,
    ) -> Self {
        Self {
            payload,
            magic_number,
            content_type,
            content_encoding,
            content_language,
        }
    }

    /// Record with only the mandatory fields set
    pub fn bare(payload: Vec<u8>, magic_number: MagicNumber) -> Self {
        Self::new(
            payload,
            magic_number,
            String::new(),
            String::new(),
            String::new(),
        )
    }

    // Getters
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn magic_number(&self) -> MagicNumber {
        self.magic_number
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn content_encoding(&self) -> &str {
        &self.content_encoding
    }

    pub fn content_language(&self) -> &str {
        &self.content_language
    }
}
