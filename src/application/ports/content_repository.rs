use thiserror::Error;

use crate::domain::entities::{ContentEntry, MetaRecord};
use crate::domain::value_objects::{ContentAddress, DocumentId};
#[cfg(test)]
use mockall::automock;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

/// What a merge did to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeOutcome {
    /// First sighting of the address
    Created,
    /// Existing entry gained a document reference
    Referenced,
    /// Entry already referenced the document
    Unchanged,
}

/// Port for the deduplicated content store
#[cfg_attr(test, automock)]
pub trait ContentRepository: Send + Sync {
    /// Create the entry at `address` or add `document_id` to its references.
    ///
    /// Must be atomic per address: two concurrent first sightings end up as
    /// one entry holding both references. Stored fields never change, even
    /// when a later record with different fields hashes to the same address.
    fn merge(
        &self,
        address: &ContentAddress,
        record: &MetaRecord,
        document_id: &DocumentId,
    ) -> Result<MergeOutcome, RepositoryError>;

    /// Undo a `Created` or `Referenced` merge: drop the reference, and the
    /// entry with it once nothing references it
    fn release(
        &self,
        address: &ContentAddress,
        document_id: &DocumentId,
    ) -> Result<(), RepositoryError>;

    fn find_by_address(
        &self,
        address: &ContentAddress,
    ) -> Result<Option<ContentEntry>, RepositoryError>;

    /// Entries referencing a document, ordered by address
    fn find_by_document(
        &self,
        document_id: &DocumentId,
    ) -> Result<Vec<ContentEntry>, RepositoryError>;

    fn count(&self) -> Result<usize, RepositoryError>;
}
