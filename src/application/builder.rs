use std::sync::Arc;

use tracing::info;

use crate::application::{
    ports::{ContentRepository, DocumentRepository},
    use_cases::{IngestMetaUseCase, MergeContentUseCase, QueryContentUseCase},
};
use crate::config::Config;
use crate::infrastructure::persistence::{
    InMemoryContentRepository, InMemoryDocumentRepository,
};

/// Wired use cases sharing one pair of stores
#[derive(Clone)]
pub struct IndexerState {
    pub ingest_use_case: Arc<IngestMetaUseCase>,
    pub merge_use_case: Arc<MergeContentUseCase>,
    pub query_use_case: Arc<QueryContentUseCase>,
    pub content_repo: Arc<dyn ContentRepository>,
    pub document_repo: Arc<dyn DocumentRepository>,
    pub config: Config,
}

/// Application builder for clean dependency injection and setup
pub struct ApplicationBuilder {
    config: Config,
    content_repo: Option<Arc<dyn ContentRepository>>,
    document_repo: Option<Arc<dyn DocumentRepository>>,
}

impl ApplicationBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            content_repo: None,
            document_repo: None,
        }
    }

    /// Use process-local stores for both content and documents
    pub fn with_in_memory_stores(mut self) -> Self {
        self.content_repo = Some(Arc::new(InMemoryContentRepository::new()));
        self.document_repo = Some(Arc::new(InMemoryDocumentRepository::new()));
        info!("In-memory stores initialized");
        self
    }

    /// Plug in a host-provided content store
    pub fn with_content_repository(mut self, repo: Arc<dyn ContentRepository>) -> Self {
        self.content_repo = Some(repo);
        self
    }

    /// Plug in a host-provided document store
    pub fn with_document_repository(mut self, repo: Arc<dyn DocumentRepository>) -> Self {
        self.document_repo = Some(repo);
        self
    }

    /// Build application state with all use cases
    pub fn build(self) -> Result<IndexerState, Box<dyn std::error::Error>> {
        self.config.validate()?;

        let content_repo = self
            .content_repo
            .ok_or("Content repository not initialized")?;
        let document_repo = self
            .document_repo
            .ok_or("Document repository not initialized")?;

        let ingest_use_case = Arc::new(IngestMetaUseCase::new(
            Arc::clone(&content_repo),
            Arc::clone(&document_repo),
            self.config.decode_limits,
            self.config.max_document_bytes,
        ));
        let merge_use_case = Arc::new(MergeContentUseCase::new(Arc::clone(&content_repo)));
        let query_use_case = Arc::new(QueryContentUseCase::new(
            Arc::clone(&content_repo),
            Arc::clone(&document_repo),
        ));

        info!(
            max_document_bytes = self.config.max_document_bytes,
            max_depth = self.config.decode_limits.max_depth,
            "Application layer initialized"
        );

        Ok(IndexerState {
            ingest_use_case,
            merge_use_case,
            query_use_case,
            content_repo,
            document_repo,
            config: self.config,
        })
    }
}
