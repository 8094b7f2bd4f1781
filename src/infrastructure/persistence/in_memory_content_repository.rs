use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::collections::BTreeSet;

use crate::application::ports::{ContentRepository, MergeOutcome, RepositoryError};
use crate::domain::entities::{ContentEntry, MetaRecord};
use crate::domain::value_objects::{ContentAddress, DocumentId};

/// Content store backed by sharded concurrent maps.
///
/// `merge` runs under the shard lock of the entry's address, so concurrent
/// merges of one address are serialized while different addresses proceed
/// in parallel. The per-document index is updated after that lock is
/// released and never held together with it. An address keeps the fields
/// of the first record merged under it.
#[derive(Debug, Default)]
pub struct InMemoryContentRepository {
    entries: DashMap<ContentAddress, ContentEntry>,
    by_document: DashMap<DocumentId, BTreeSet<ContentAddress>>,
}

impl InMemoryContentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ContentRepository for InMemoryContentRepository {
    fn merge(
        &self,
        address: &ContentAddress,
        record: &MetaRecord,
        document_id: &DocumentId,
    ) -> Result<MergeOutcome, RepositoryError> {
        let outcome = match self.entries.entry(address.clone()) {
            Entry::Occupied(mut occupied) => {
                let entry = occupied.get_mut();
                if entry.record() != record {
                    tracing::debug!(
                        address = %address,
                        document_id = %document_id,
                        "Record shares its address with a stored record; keeping stored fields"
                    );
                }

                if entry.add_reference(document_id.clone()) {
                    MergeOutcome::Referenced
                } else {
                    MergeOutcome::Unchanged
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(ContentEntry::new(
                    address.clone(),
                    record.clone(),
                    document_id.clone(),
                ));
                MergeOutcome::Created
            }
        };

        if outcome != MergeOutcome::Unchanged {
            self.by_document
                .entry(document_id.clone())
                .or_default()
                .insert(address.clone());
        }

        Ok(outcome)
    }

    fn release(
        &self,
        address: &ContentAddress,
        document_id: &DocumentId,
    ) -> Result<(), RepositoryError> {
        match self.entries.entry(address.clone()) {
            Entry::Occupied(mut occupied) => {
                if !occupied.get_mut().remove_reference(document_id) {
                    return Err(RepositoryError::NotFound(format!(
                        "content entry {} is not referenced by {}",
                        address, document_id
                    )));
                }
                if occupied.get().reference_count() == 0 {
                    occupied.remove();
                }
            }
            Entry::Vacant(_) => {
                return Err(RepositoryError::NotFound(format!(
                    "no content entry at {}",
                    address
                )));
            }
        }

        if let Some(mut addresses) = self.by_document.get_mut(document_id) {
            addresses.remove(address);
        }
        self.by_document
            .remove_if(document_id, |_, addresses| addresses.is_empty());

        Ok(())
    }

    fn find_by_address(
        &self,
        address: &ContentAddress,
    ) -> Result<Option<ContentEntry>, RepositoryError> {
        Ok(self.entries.get(address).map(|entry| entry.value().clone()))
    }

    fn find_by_document(
        &self,
        document_id: &DocumentId,
    ) -> Result<Vec<ContentEntry>, RepositoryError> {
        let addresses = match self.by_document.get(document_id) {
            Some(addresses) => addresses.value().clone(),
            None => return Ok(Vec::new()),
        };

        Ok(addresses
            .iter()
            .filter_map(|address| self.entries.get(address).map(|e| e.value().clone()))
            .collect())
    }

    fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.entries.len())
    }
}
