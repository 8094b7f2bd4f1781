//! Generic value tree produced by [`MetaDecoder`](super::MetaDecoder).

use std::collections::HashSet;

/// Map key. Text keys spelling a canonical decimal are folded into
/// `Index`, so `0` and `"0"` address the same field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MapKey {
    Index(u64),
    Text(String),
}

impl MapKey {
    pub fn from_text(text: &str) -> Self {
        match parse_canonical_decimal(text) {
            Some(index) => MapKey::Index(index),
            None => MapKey::Text(text.to_string()),
        }
    }
}

impl std::fmt::Display for MapKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapKey::Index(index) => write!(f, "{}", index),
            MapKey::Text(text) => write!(f, "{:?}", text),
        }
    }
}

fn parse_canonical_decimal(text: &str) -> Option<u64> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if text.len() > 1 && text.starts_with('0') {
        return None;
    }
    text.parse().ok()
}

/// Map with unique keys, in wire order. `keys` mirrors the keys of
/// `entries` so the duplicate check stays constant time per insert.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueMap {
    entries: Vec<(MapKey, Value)>,
    keys: HashSet<MapKey>,
}

impl ValueMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert unless the key is taken; hands the key back on collision
    pub fn try_insert(&mut self, key: MapKey, value: Value) -> Result<(), MapKey> {
        if self.keys.contains(&key) {
            return Err(key);
        }
        self.keys.insert(key.clone());
        self.entries.push((key, value));
        Ok(())
    }

    pub fn get(&self, index: u64) -> Option<&Value> {
        self.get_key(&MapKey::Index(index))
    }

    pub fn get_key(&self, key: &MapKey) -> Option<&Value> {
        if !self.keys.contains(key) {
            return None;
        }
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Unsigned(u64),
    /// Negative integer; CBOR reaches down to -2^64
    Negative(i128),
    Bytes(Vec<u8>),
    Text(String),
    Array(Vec<Value>),
    Map(ValueMap),
    Bool(bool),
    Null,
    Undefined,
}

impl Value {
    /// Short kind name for error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Unsigned(_) => "unsigned",
            Value::Negative(_) => "negative",
            Value::Bytes(_) => "bytes",
            Value::Text(_) => "text",
            Value::Array(_) => "array",
            Value::Map(_) => "map",
            Value::Bool(_) => "bool",
            Value::Null => "null",
            Value::Undefined => "undefined",
        }
    }

    pub fn as_map(&self) -> Option<&ValueMap> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }
}

/// Decoded top level of a document: the stripped bytes form a CBOR
/// sequence, which may hold a single item or several
#[derive(Debug, Clone, PartialEq)]
pub enum MetaTree {
    Single(Value),
    Sequence(Vec<Value>),
}

impl MetaTree {
    pub fn items(&self) -> &[Value] {
        match self {
            MetaTree::Single(value) => std::slice::from_ref(value),
            MetaTree::Sequence(values) => values,
        }
    }
}
