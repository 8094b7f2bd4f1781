mod content_entry;
mod document;
mod meta_record;

pub use content_entry::ContentEntry;
pub use document::Document;
pub use meta_record::MetaRecord;
