mod decoder;
mod value;

pub use decoder::{
    DecodeError, DecodeLimits, MetaDecoder, DEFAULT_MAX_CONTAINER_ITEMS, DEFAULT_MAX_DEPTH,
    DEFAULT_MAX_STRING_BYTES,
};
pub use value::{MapKey, MetaTree, Value, ValueMap};
