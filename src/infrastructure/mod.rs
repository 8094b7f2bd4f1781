pub mod codec;
pub mod hashing;
pub mod persistence;
