use sha3::{Digest, Keccak256};

use crate::domain::entities::MetaRecord;
use crate::domain::value_objects::ContentAddress;

/// Utility for computing Keccak-256 content addresses.
///
/// Addresses must match the IDs the chain-side tooling derives, so the
/// field layout is fixed: payload, canonical magic number, then the three
/// optional strings as UTF-8. Empty fields contribute no bytes.
pub struct ContentHasher;

impl ContentHasher {
    /// Address of an opaque byte string (a whole meta document)
    pub fn hash_bytes(data: &[u8]) -> ContentAddress {
        finish(Keccak256::digest(data).as_slice())
    }

    /// Address of a record's field tuple
    pub fn hash_record(record: &MetaRecord) -> ContentAddress {
        let mut hasher = Keccak256::new();
        hasher.update(record.payload());
        hasher.update(record.magic_number().to_canonical_bytes());
        hasher.update(record.content_type().as_bytes());
        hasher.update(record.content_encoding().as_bytes());
        hasher.update(record.content_language().as_bytes());

        finish(hasher.finalize().as_slice())
    }
}

fn finish(digest: &[u8]) -> ContentAddress {
    let mut out = [0u8; 32];
    out.copy_from_slice(digest);
    ContentAddress::from_digest(out)
}
