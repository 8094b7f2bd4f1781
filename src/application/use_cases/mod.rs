mod ingest_meta;
mod merge_content;
mod query_content;

pub use ingest_meta::IngestMetaUseCase;
pub use merge_content::MergeContentUseCase;
pub use query_content::QueryContentUseCase;
