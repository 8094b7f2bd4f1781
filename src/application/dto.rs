use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::application::errors::{IngestOutcome, MergeResult};
use crate::application::ports::MergeOutcome;
use crate::domain::entities::{ContentEntry, Document};

/// A `MetaV1(sender, subject, meta)` emission as delivered by the host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaEvent {
    /// Emitting account, `0x`-prefixed hex
    pub sender: String,
    /// Subject the meta describes, hex (odd lengths allowed)
    pub subject: String,
    pub meta: Bytes,
}

/// DTO for content entry responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentEntryDto {
    pub address: String,
    pub payload: String,
    pub magic_number: String,
    pub content_type: String,
    pub content_encoding: String,
    pub content_language: String,
    pub documents: Vec<String>,
}

impl From<ContentEntry> for ContentEntryDto {
    fn from(entry: ContentEntry) -> Self {
        let record = entry.record();
        Self {
            address: entry.address().to_prefixed_hex(),
            payload: format!("0x{}", hex::encode(record.payload())),
            magic_number: record.magic_number().to_string(),
            content_type: record.content_type().to_string(),
            content_encoding: record.content_encoding().to_string(),
            content_language: record.content_language().to_string(),
            documents: entry.documents().iter().map(|d| d.to_string()).collect(),
        }
    }
}

/// DTO for document responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentDto {
    pub content_address: String,
    pub meta_bytes: String,
    /// Document IDs the bytes were seen under
    pub sources: Vec<String>,
    pub subjects: Vec<String>,
}

impl From<Document> for DocumentDto {
    fn from(doc: Document) -> Self {
        Self {
            content_address: doc.content_address().to_prefixed_hex(),
            meta_bytes: format!("0x{}", hex::encode(doc.meta_bytes())),
            sources: doc.sources().iter().map(|s| s.to_string()).collect(),
            subjects: doc.subjects().iter().cloned().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeResultDto {
    pub address: String,
    pub outcome: MergeOutcome,
}

impl From<&MergeResult> for MergeResultDto {
    fn from(merge: &MergeResult) -> Self {
        Self {
            address: merge.address.to_prefixed_hex(),
            outcome: merge.outcome,
        }
    }
}

/// Serializable summary of one ingestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum IngestOutcomeDto {
    Skipped {
        reason: String,
        detail: String,
    },
    Indexed {
        document_id: String,
        content_address: String,
        merges: Vec<MergeResultDto>,
    },
}

impl From<&IngestOutcome> for IngestOutcomeDto {
    fn from(outcome: &IngestOutcome) -> Self {
        match outcome {
            IngestOutcome::Skipped(reason) => IngestOutcomeDto::Skipped {
                reason: reason.as_str().to_string(),
                detail: reason.to_string(),
            },
            IngestOutcome::Indexed(doc) => IngestOutcomeDto::Indexed {
                document_id: doc.document_id.to_string(),
                content_address: doc.content_address.to_prefixed_hex(),
                merges: doc.merges.iter().map(MergeResultDto::from).collect(),
            },
        }
    }
}
