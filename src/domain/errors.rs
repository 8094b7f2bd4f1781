use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Validation error in field '{field}': {message}")]
    ValidationError { field: String, message: String },

    #[error("Content address mismatch: expected {expected}, got {actual}")]
    ContentAddressMismatch { expected: String, actual: String },

    #[error("Invalid document ID: {0}")]
    InvalidDocumentId(String),
}
