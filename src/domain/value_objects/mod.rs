mod content_address;
mod document_id;
mod magic_number;

pub use content_address::ContentAddress;
pub use document_id::DocumentId;
pub use magic_number::{MagicNumber, RAIN_META_DOCUMENT_V1};
