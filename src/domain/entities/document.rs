use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::domain::value_objects::{ContentAddress, DocumentId};

/// Raw meta document as emitted on chain, identified by the content address
/// of its bytes. The bytes never change; only the sets of documents and
/// subjects it was seen under grow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    content_address: ContentAddress,
    meta_bytes: Bytes,
    sources: BTreeSet<DocumentId>,
    subjects: BTreeSet<String>,
}

impl Document {
    pub fn new(content_address: ContentAddress, meta_bytes: Bytes) -> Self {
        Self {
            content_address,
            meta_bytes,
            sources: BTreeSet::new(),
            subjects: BTreeSet::new(),
        }
    }

    /// Record a document ID the blob was ingested under; false when already known
    pub fn add_source(&mut self, document_id: DocumentId) -> bool {
        self.sources.insert(document_id)
    }

    /// Record an (even-length hex) subject; false when already known
    pub fn add_subject(&mut self, subject: String) -> bool {
        self.subjects.insert(subject)
    }

    /// Fold the sources and subjects of another sighting of the same blob
    pub fn absorb(&mut self, other: Document) {
        self.sources.extend(other.sources);
        self.subjects.extend(other.subjects);
    }

    // Getters
    pub fn content_address(&self) -> &ContentAddress {
        &self.content_address
    }

    pub fn meta_bytes(&self) -> &Bytes {
        &self.meta_bytes
    }

    pub fn sources(&self) -> &BTreeSet<DocumentId> {
        &self.sources
    }

    pub fn subjects(&self) -> &BTreeSet<String> {
        &self.subjects
    }
}
