mod content_repository;
mod document_repository;

pub use content_repository::{ContentRepository, MergeOutcome, RepositoryError};
pub use document_repository::DocumentRepository;

#[cfg(test)]
pub use content_repository::MockContentRepository;
#[cfg(test)]
pub use document_repository::MockDocumentRepository;
