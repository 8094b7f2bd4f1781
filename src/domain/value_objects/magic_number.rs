use serde::{Deserialize, Serialize};

/// Magic number opening every Rain meta document (big-endian on the wire)
pub const RAIN_META_DOCUMENT_V1: MagicNumber = MagicNumber(0xff0a_89c6_74ee_7874);

/// Unsigned 64-bit magic number, either the document marker or the
/// per-item content kind carried under key `1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MagicNumber(u64);

impl MagicNumber {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// Minimal big-endian bytes; zero is a single `0x00`
    pub fn to_canonical_bytes(&self) -> Vec<u8> {
        let bytes = self.0.to_be_bytes();
        let first = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len() - 1);
        bytes[first..].to_vec()
    }

    /// Bytes following this magic number when `blob` starts with it
    pub fn strip_from<'a>(&self, blob: &'a [u8]) -> Option<&'a [u8]> {
        blob.strip_prefix(&self.0.to_be_bytes()[..])
    }
}

impl From<u64> for MagicNumber {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for MagicNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}
