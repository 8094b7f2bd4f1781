//! Interpretation of decoded meta items as content records.
//!
//! An item is a map keyed `0..=4`: payload and magic number are mandatory,
//! content type, encoding and language are optional text. A document is
//! accepted only if every item in it is valid.

use thiserror::Error;

use crate::domain::entities::MetaRecord;
use crate::domain::errors::DomainError;
use crate::domain::validation::Validation;
use crate::domain::value_objects::MagicNumber;
use crate::infrastructure::codec::{MetaTree, Value, ValueMap};

pub const PAYLOAD_KEY: u64 = 0;
pub const MAGIC_NUMBER_KEY: u64 = 1;
pub const CONTENT_TYPE_KEY: u64 = 2;
pub const CONTENT_ENCODING_KEY: u64 = 3;
pub const CONTENT_LANGUAGE_KEY: u64 = 4;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Item is not a map: found {0}")]
    NotAnObject(&'static str),

    #[error("Missing mandatory field: {0}")]
    MissingField(&'static str),

    #[error("Field {field} must be {expected}, found {found}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Invalid payload: {0}")]
    InvalidPayload(#[from] DomainError),

    #[error("Item {index} of sequence is invalid: {source}")]
    InSequence {
        index: usize,
        #[source]
        source: Box<ValidationError>,
    },
}

/// All records of a decoded document, or the first reason it is rejected
pub fn build_records(tree: &MetaTree) -> Result<Vec<MetaRecord>, ValidationError> {
    match tree {
        MetaTree::Single(value) => Ok(vec![build_record(value)?]),
        MetaTree::Sequence(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                build_record(item).map_err(|source| ValidationError::InSequence {
                    index,
                    source: Box::new(source),
                })
            })
            .collect(),
    }
}

/// Validate one item and build its record
pub fn build_record(value: &Value) -> Result<MetaRecord, ValidationError> {
    let map = value
        .as_map()
        .ok_or_else(|| ValidationError::NotAnObject(value.kind()))?;

    let payload = map
        .get(PAYLOAD_KEY)
        .ok_or(ValidationError::MissingField("payload"))?;
    let magic_number = map
        .get(MAGIC_NUMBER_KEY)
        .ok_or(ValidationError::MissingField("magic_number"))?;

    let payload = match payload {
        Value::Text(text) => Validation::decode_quoted_hex(text, "payload")?,
        Value::Bytes(bytes) if bytes.is_empty() => {
            return Err(DomainError::ValidationError {
                field: "payload".to_string(),
                message: "Payload cannot be empty".to_string(),
            }
            .into())
        }
        Value::Bytes(bytes) => bytes.clone(),
        other => {
            return Err(ValidationError::WrongType {
                field: "payload",
                expected: "text or bytes",
                found: other.kind(),
            })
        }
    };

    let magic_number = match magic_number {
        Value::Unsigned(value) => MagicNumber::new(*value),
        other => {
            return Err(ValidationError::WrongType {
                field: "magic_number",
                expected: "unsigned integer",
                found: other.kind(),
            })
        }
    };

    Ok(MetaRecord::new(
        payload,
        magic_number,
        optional_text(map, CONTENT_TYPE_KEY, "content_type")?,
        optional_text(map, CONTENT_ENCODING_KEY, "content_encoding")?,
        optional_text(map, CONTENT_LANGUAGE_KEY, "content_language")?,
    ))
}

fn optional_text(
    map: &ValueMap,
    key: u64,
    field: &'static str,
) -> Result<String, ValidationError> {
    match map.get(key) {
        None => Ok(String::new()),
        Some(Value::Text(text)) => Ok(text.clone()),
        Some(other) => Err(ValidationError::WrongType {
            field,
            expected: "text",
            found: other.kind(),
        }),
    }
}
