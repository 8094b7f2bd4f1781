use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::domain::entities::MetaRecord;
use crate::domain::value_objects::{ContentAddress, DocumentId};

/// Deduplicated content entry - one per content address, with the set of
/// documents that carried it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentEntry {
    address: ContentAddress,
    record: MetaRecord,
    documents: BTreeSet<DocumentId>,
}

impl ContentEntry {
    /// Create new entry referenced by a single document
    pub fn new(address: ContentAddress, record: MetaRecord, document_id: DocumentId) -> Self {
        Self {
            address,
            record,
            documents: BTreeSet::from([document_id]),
        }
    }

    /// Add a document reference; false when it was already present
    pub fn add_reference(&mut self, document_id: DocumentId) -> bool {
        self.documents.insert(document_id)
    }

    /// Drop a document reference; false when it was not present
    pub fn remove_reference(&mut self, document_id: &DocumentId) -> bool {
        self.documents.remove(document_id)
    }

    pub fn is_referenced_by(&self, document_id: &DocumentId) -> bool {
        self.documents.contains(document_id)
    }

    // Getters
    pub fn address(&self) -> &ContentAddress {
        &self.address
    }

    pub fn record(&self) -> &MetaRecord {
        &self.record
    }

    pub fn documents(&self) -> &BTreeSet<DocumentId> {
        &self.documents
    }

    pub fn reference_count(&self) -> usize {
        self.documents.len()
    }
}
