mod content_hasher;

pub use content_hasher::ContentHasher;
