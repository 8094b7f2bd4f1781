mod in_memory_content_repository;
mod in_memory_document_repository;

pub use in_memory_content_repository::InMemoryContentRepository;
pub use in_memory_document_repository::InMemoryDocumentRepository;
