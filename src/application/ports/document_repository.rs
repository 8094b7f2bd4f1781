use crate::domain::entities::Document;
use crate::domain::value_objects::{ContentAddress, DocumentId};
#[cfg(test)]
use mockall::automock;

use super::RepositoryError;

/// Port for raw documents, keyed by the content address of their bytes
#[cfg_attr(test, automock)]
pub trait DocumentRepository: Send + Sync {
    /// Store the document on first sighting of its address, otherwise fold
    /// its sources and subjects into the stored copy. Returns the stored copy.
    ///
    /// Different bytes under a known address are a `Conflict`.
    fn save(&self, document: Document) -> Result<Document, RepositoryError>;

    fn find_by_address(
        &self,
        address: &ContentAddress,
    ) -> Result<Option<Document>, RepositoryError>;

    /// Documents ingested under `document_id`, ordered by address
    fn find_by_source(&self, document_id: &DocumentId) -> Result<Vec<Document>, RepositoryError>;

    fn count(&self) -> Result<usize, RepositoryError>;
}
