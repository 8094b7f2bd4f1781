//! # flow_meta_index - Content-addressed index for Rain meta documents
//!
//! Decodes the CBOR meta documents emitted by the Flow contracts, validates
//! each item against the five-field record schema, and merges the records
//! into a deduplicated store keyed by their Keccak-256 content address.
//!
//! ## Architecture Layers
//!
//! - **Domain**: Core types (entities, value objects, domain errors, hex validation)
//! - **Application**: Use cases, ports (interfaces) and record validation
//! - **Infrastructure**: CBOR decoder, content hasher and in-memory stores
//!
//! ## Key Properties
//!
//! - Fail-closed: a document that does not fully decode and validate leaves no trace
//! - Idempotent merges, deduplicated across documents
//! - Merges are atomic per content address
//!
//! ## Example Usage
//!
//! ```no_run
//! use flow_meta_index::{ApplicationBuilder, Config};
//! use flow_meta_index::value_objects::DocumentId;
//!
//! # fn example(meta: &[u8]) -> Result<(), Box<dyn std::error::Error>> {
//! let state = ApplicationBuilder::new(Config::from_env())
//!     .with_in_memory_stores()
//!     .build()?;
//!
//! let outcome = state
//!     .ingest_use_case
//!     .execute(meta, &DocumentId::new("0xabc")?)?;
//! println!("indexed: {}", outcome.is_indexed());
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod telemetry;

// Re-export key types explicitly to avoid ambiguity
pub use application::builder::{ApplicationBuilder, IndexerState};
pub use application::errors::{IngestError, IngestOutcome, QueryError, SkipReason};
pub use application::{dto, ports, use_cases};
pub use config::Config;
pub use domain::errors as domain_errors;
pub use domain::{entities, value_objects};
