//! CBOR sequence decoder for Rain meta documents.
//!
//! Decoding is all-or-nothing: any malformed, truncated or unsupported item
//! fails the whole input, and limits are checked before anything is
//! allocated on the strength of a length prefix.

use minicbor::data::Type;
use minicbor::Decoder;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::value::{MapKey, MetaTree, Value, ValueMap};

/// Nesting depth allowed below the top-level item
pub const DEFAULT_MAX_DEPTH: usize = 16;

/// Items per array, map or top-level sequence
pub const DEFAULT_MAX_CONTAINER_ITEMS: usize = 1024;

/// Bytes per byte/text string, summed over chunks
pub const DEFAULT_MAX_STRING_BYTES: usize = 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeLimits {
    pub max_depth: usize,
    pub max_container_items: usize,
    pub max_string_bytes: usize,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_container_items: DEFAULT_MAX_CONTAINER_ITEMS,
            max_string_bytes: DEFAULT_MAX_STRING_BYTES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("Document is empty")]
    Empty,

    #[error("Input truncated")]
    Truncated,

    #[error("Malformed input: {0}")]
    Malformed(String),

    #[error("Unsupported data item: {0}")]
    Unsupported(String),

    #[error("Unsupported map key: {0}")]
    UnsupportedKey(String),

    #[error("Duplicate map key: {0}")]
    DuplicateKey(String),

    #[error("Decode limit exceeded: {0}")]
    LimitExceeded(&'static str),

    #[error("Document too large: {size} > {max} bytes")]
    DocumentTooLarge { size: usize, max: usize },
}

impl From<minicbor::decode::Error> for DecodeError {
    fn from(err: minicbor::decode::Error) -> Self {
        if err.is_end_of_input() {
            DecodeError::Truncated
        } else {
            DecodeError::Malformed(err.to_string())
        }
    }
}

/// Decodes the bytes following the document magic number into a [`MetaTree`]
#[derive(Debug, Clone, Default)]
pub struct MetaDecoder {
    limits: DecodeLimits,
}

impl MetaDecoder {
    pub fn new(limits: DecodeLimits) -> Self {
        Self { limits }
    }

    /// Decode every item in `input`. One item gives [`MetaTree::Single`],
    /// more give [`MetaTree::Sequence`].
    pub fn decode(&self, input: &[u8]) -> Result<MetaTree, DecodeError> {
        if input.is_empty() {
            return Err(DecodeError::Empty);
        }

        let mut dec = Decoder::new(input);
        let mut items = Vec::new();
        while dec.position() < input.len() {
            if items.len() == self.limits.max_container_items {
                return Err(DecodeError::LimitExceeded("max_container_items"));
            }
            items.push(self.decode_value(&mut dec, 0)?);
        }

        match <[Value; 1]>::try_from(items) {
            Ok([item]) => Ok(MetaTree::Single(item)),
            Err(items) => Ok(MetaTree::Sequence(items)),
        }
    }

    fn decode_value(&self, dec: &mut Decoder<'_>, depth: usize) -> Result<Value, DecodeError> {
        if depth > self.limits.max_depth {
            return Err(DecodeError::LimitExceeded("max_depth"));
        }

        match dec.datatype()? {
            Type::U8 | Type::U16 | Type::U32 | Type::U64 => Ok(Value::Unsigned(dec.u64()?)),
            Type::I8 | Type::I16 | Type::I32 | Type::I64 | Type::Int => {
                Ok(Value::Negative(i128::from(dec.int()?)))
            }
            Type::Bytes | Type::BytesIndef => self.decode_bytes(dec).map(Value::Bytes),
            Type::String | Type::StringIndef => self.decode_text(dec).map(Value::Text),
            Type::Array | Type::ArrayIndef => self.decode_array(dec, depth),
            Type::Map | Type::MapIndef => self.decode_map(dec, depth),
            Type::Bool => Ok(Value::Bool(dec.bool()?)),
            Type::Null => {
                dec.null()?;
                Ok(Value::Null)
            }
            Type::Undefined => {
                dec.undefined()?;
                Ok(Value::Undefined)
            }
            Type::Break => Err(DecodeError::Malformed("unexpected break".to_string())),
            other => Err(DecodeError::Unsupported(other.to_string())),
        }
    }

    fn decode_bytes(&self, dec: &mut Decoder<'_>) -> Result<Vec<u8>, DecodeError> {
        let mut out = Vec::new();
        for chunk in dec.bytes_iter()? {
            let chunk = chunk?;
            if out.len() + chunk.len() > self.limits.max_string_bytes {
                return Err(DecodeError::LimitExceeded("max_string_bytes"));
            }
            out.extend_from_slice(chunk);
        }
        Ok(out)
    }

    fn decode_text(&self, dec: &mut Decoder<'_>) -> Result<String, DecodeError> {
        let mut out = String::new();
        for chunk in dec.str_iter()? {
            let chunk = chunk?;
            if out.len() + chunk.len() > self.limits.max_string_bytes {
                return Err(DecodeError::LimitExceeded("max_string_bytes"));
            }
            out.push_str(chunk);
        }
        Ok(out)
    }

    fn decode_array(&self, dec: &mut Decoder<'_>, depth: usize) -> Result<Value, DecodeError> {
        let mut items = Vec::new();
        match dec.array()? {
            Some(len) => {
                let len = self.check_len(len)?;
                items.reserve(len);
                for _ in 0..len {
                    items.push(self.decode_value(dec, depth + 1)?);
                }
            }
            None => {
                while !at_break(dec)? {
                    if items.len() == self.limits.max_container_items {
                        return Err(DecodeError::LimitExceeded("max_container_items"));
                    }
                    items.push(self.decode_value(dec, depth + 1)?);
                }
                consume_break(dec);
            }
        }
        Ok(Value::Array(items))
    }

    fn decode_map(&self, dec: &mut Decoder<'_>, depth: usize) -> Result<Value, DecodeError> {
        let mut map = ValueMap::new();
        match dec.map()? {
            Some(len) => {
                let len = self.check_len(len)?;
                for _ in 0..len {
                    self.decode_entry(dec, depth, &mut map)?;
                }
            }
            None => {
                while !at_break(dec)? {
                    if map.len() == self.limits.max_container_items {
                        return Err(DecodeError::LimitExceeded("max_container_items"));
                    }
                    self.decode_entry(dec, depth, &mut map)?;
                }
                consume_break(dec);
            }
        }
        Ok(Value::Map(map))
    }

    fn decode_entry(
        &self,
        dec: &mut Decoder<'_>,
        depth: usize,
        map: &mut ValueMap,
    ) -> Result<(), DecodeError> {
        let key = self.decode_key(dec)?;
        let value = self.decode_value(dec, depth + 1)?;
        map.try_insert(key, value)
            .map_err(|key| DecodeError::DuplicateKey(key.to_string()))
    }

    fn decode_key(&self, dec: &mut Decoder<'_>) -> Result<MapKey, DecodeError> {
        match dec.datatype()? {
            Type::U8 | Type::U16 | Type::U32 | Type::U64 => Ok(MapKey::Index(dec.u64()?)),
            Type::String | Type::StringIndef => Ok(MapKey::from_text(&self.decode_text(dec)?)),
            other => Err(DecodeError::UnsupportedKey(other.to_string())),
        }
    }

    fn check_len(&self, len: u64) -> Result<usize, DecodeError> {
        if len > self.limits.max_container_items as u64 {
            return Err(DecodeError::LimitExceeded("max_container_items"));
        }
        usize::try_from(len).map_err(|_| DecodeError::LimitExceeded("max_container_items"))
    }
}

fn at_break(dec: &mut Decoder<'_>) -> Result<bool, DecodeError> {
    Ok(matches!(dec.datatype()?, Type::Break))
}

// `break` is a single 0xff byte
fn consume_break(dec: &mut Decoder<'_>) {
    dec.set_position(dec.position() + 1);
}
