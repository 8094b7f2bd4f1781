//! Outcomes and error types shared by the use cases
//!
//! A document that is not ours, does not decode, or does not validate is a
//! [`SkipReason`], not an error. Errors are reserved for defects reported by
//! the repositories.

use thiserror::Error;

use crate::application::ports::{MergeOutcome, RepositoryError};
use crate::application::validation::ValidationError;
use crate::domain::errors::DomainError;
use crate::domain::value_objects::{ContentAddress, DocumentId};
use crate::infrastructure::codec::DecodeError;

/// Why a document left no trace in the stores
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("Blob does not start with the meta document magic number")]
    FormatMismatch,

    #[error("Decode failure: {0}")]
    DecodeFailure(#[from] DecodeError),

    #[error("Validation failure: {0}")]
    ValidationFailure(#[from] ValidationError),
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::FormatMismatch => "format_mismatch",
            SkipReason::DecodeFailure(_) => "decode_failure",
            SkipReason::ValidationFailure(_) => "validation_failure",
        }
    }
}

/// One record merged into the content store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeResult {
    pub address: ContentAddress,
    pub outcome: MergeOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedDocument {
    pub document_id: DocumentId,
    pub content_address: ContentAddress,
    pub merges: Vec<MergeResult>,
}

impl IndexedDocument {
    /// Number of content entries created by this document
    pub fn created(&self) -> usize {
        self.merges
            .iter()
            .filter(|m| m.outcome == MergeOutcome::Created)
            .count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    Skipped(SkipReason),
    Indexed(IndexedDocument),
}

impl IngestOutcome {
    pub fn is_indexed(&self) -> bool {
        matches!(self, IngestOutcome::Indexed(_))
    }

    pub fn skip_reason(&self) -> Option<&SkipReason> {
        match self {
            IngestOutcome::Skipped(reason) => Some(reason),
            IngestOutcome::Indexed(_) => None,
        }
    }
}

/// Error type for ingestion use cases. Only store defects get here; any
/// partial writes are rolled back before it is returned.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Error type for query use cases
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Not found: {0}")]
    NotFound(String),
}
