use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::collections::BTreeSet;

use crate::application::ports::{DocumentRepository, RepositoryError};
use crate::domain::entities::Document;
use crate::domain::value_objects::{ContentAddress, DocumentId};

/// Document store backed by concurrent maps, keyed by content address with
/// a secondary index from source document ID
#[derive(Debug, Default)]
pub struct InMemoryDocumentRepository {
    documents: DashMap<ContentAddress, Document>,
    by_source: DashMap<DocumentId, BTreeSet<ContentAddress>>,
}

impl InMemoryDocumentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentRepository for InMemoryDocumentRepository {
    fn save(&self, document: Document) -> Result<Document, RepositoryError> {
        let address = document.content_address().clone();
        let sources: Vec<DocumentId> = document.sources().iter().cloned().collect();

        let stored = match self.documents.entry(address.clone()) {
            Entry::Occupied(mut occupied) => {
                let stored = occupied.get_mut();
                if stored.meta_bytes() != document.meta_bytes() {
                    tracing::error!(address = %address, "Different bytes stored under document address");
                    return Err(RepositoryError::Conflict(format!(
                        "document {} already holds different bytes",
                        address
                    )));
                }
                stored.absorb(document);
                stored.clone()
            }
            Entry::Vacant(vacant) => vacant.insert(document).value().clone(),
        };

        for source in sources {
            self.by_source
                .entry(source)
                .or_default()
                .insert(address.clone());
        }

        Ok(stored)
    }

    fn find_by_address(
        &self,
        address: &ContentAddress,
    ) -> Result<Option<Document>, RepositoryError> {
        Ok(self.documents.get(address).map(|d| d.value().clone()))
    }

    fn find_by_source(&self, document_id: &DocumentId) -> Result<Vec<Document>, RepositoryError> {
        let addresses = match self.by_source.get(document_id) {
            Some(addresses) => addresses.value().clone(),
            None => return Ok(Vec::new()),
        };

        Ok(addresses
            .iter()
            .filter_map(|address| self.documents.get(address).map(|d| d.value().clone()))
            .collect())
    }

    fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.documents.len())
    }
}
