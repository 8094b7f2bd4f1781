//! Ingestion of raw meta documents.
//!
//! The pure half ([`IngestMetaUseCase::prepare`]) checks the magic number,
//! decodes and validates. Only when it yields records does the effectful
//! half touch the stores, so a rejected document never leaves a partial
//! trace.

use bytes::Bytes;
use std::sync::Arc;

use crate::application::dto::MetaEvent;
use crate::application::errors::{
    IndexedDocument, IngestError, IngestOutcome, MergeResult, SkipReason,
};
use crate::application::ports::{ContentRepository, DocumentRepository};
use crate::application::use_cases::MergeContentUseCase;
use crate::application::validation::build_records;
use crate::domain::entities::{Document, MetaRecord};
use crate::domain::validation::Validation;
use crate::domain::value_objects::{DocumentId, RAIN_META_DOCUMENT_V1};
use crate::infrastructure::codec::{DecodeError, DecodeLimits, MetaDecoder};
use crate::infrastructure::hashing::ContentHasher;

/// Use case: Decode, validate and index a meta document
pub struct IngestMetaUseCase {
    decoder: MetaDecoder,
    max_document_bytes: usize,
    document_repo: Arc<dyn DocumentRepository>,
    merge_content: MergeContentUseCase,
}

impl IngestMetaUseCase {
    pub fn new(
        content_repo: Arc<dyn ContentRepository>,
        document_repo: Arc<dyn DocumentRepository>,
        decode_limits: DecodeLimits,
        max_document_bytes: usize,
    ) -> Self {
        Self {
            decoder: MetaDecoder::new(decode_limits),
            max_document_bytes,
            document_repo,
            merge_content: MergeContentUseCase::new(content_repo),
        }
    }

    /// Records carried by `meta`, or why it must be skipped
    pub fn prepare(&self, meta: &[u8]) -> Result<Vec<MetaRecord>, SkipReason> {
        if meta.len() > self.max_document_bytes {
            return Err(DecodeError::DocumentTooLarge {
                size: meta.len(),
                max: self.max_document_bytes,
            }
            .into());
        }

        let body = RAIN_META_DOCUMENT_V1
            .strip_from(meta)
            .ok_or(SkipReason::FormatMismatch)?;
        let tree = self.decoder.decode(body)?;

        Ok(build_records(&tree)?)
    }

    /// Index `meta` under a host-supplied document ID
    pub fn execute(
        &self,
        meta: &[u8],
        document_id: &DocumentId,
    ) -> Result<IngestOutcome, IngestError> {
        let records = match self.prepare(meta) {
            Ok(records) => records,
            Err(reason) => return Ok(self.skip(document_id, reason)),
        };

        let mut document = Document::new(
            ContentHasher::hash_bytes(meta),
            Bytes::copy_from_slice(meta),
        );
        document.add_source(document_id.clone());

        self.commit(document, document_id, &records)
            .map(IngestOutcome::Indexed)
    }

    /// Index a `MetaV1` emission. The document ID is the content address
    /// of the meta bytes; the event subject is recorded on the document.
    pub fn execute_event(&self, event: &MetaEvent) -> Result<IngestOutcome, IngestError> {
        let address = ContentHasher::hash_bytes(&event.meta);
        let document_id = DocumentId::from_content_address(&address);

        let records = match self.prepare(&event.meta) {
            Ok(records) => records,
            Err(reason) => return Ok(self.skip(&document_id, reason)),
        };

        let mut document = Document::new(address, event.meta.clone());
        document.add_source(document_id.clone());
        document.add_subject(Validation::normalize_even_length(&event.subject));

        tracing::debug!(
            document_id = %document_id,
            sender = %event.sender,
            subject = %event.subject,
            "Recording meta emission"
        );

        self.commit(document, &document_id, &records)
            .map(IngestOutcome::Indexed)
    }

    fn skip(&self, document_id: &DocumentId, reason: SkipReason) -> IngestOutcome {
        tracing::debug!(
            document_id = %document_id,
            reason = reason.as_str(),
            detail = %reason,
            "Skipping meta document"
        );
        IngestOutcome::Skipped(reason)
    }

    /// Merge every record, then store the document. A failure at any step
    /// releases the merges already made, so the stores end up as before.
    fn commit(
        &self,
        document: Document,
        document_id: &DocumentId,
        records: &[MetaRecord],
    ) -> Result<IndexedDocument, IngestError> {
        let content_address = document.content_address().clone();

        let mut merges = Vec::with_capacity(records.len());
        for record in records {
            match self.merge_content.execute(record, document_id) {
                Ok(merge) => merges.push(merge),
                Err(e) => {
                    tracing::error!(document_id = %document_id, error = %e, "Failed to merge record");
                    self.roll_back(&merges, document_id);
                    return Err(e);
                }
            }
        }

        if let Err(e) = self.document_repo.save(document) {
            tracing::error!(document_id = %document_id, error = %e, "Failed to store document");
            self.roll_back(&merges, document_id);
            return Err(e.into());
        }

        let indexed = IndexedDocument {
            document_id: document_id.clone(),
            content_address,
            merges,
        };

        tracing::info!(
            document_id = %indexed.document_id,
            content_address = %indexed.content_address,
            records = indexed.merges.len(),
            created = indexed.created(),
            "Indexed meta document"
        );

        Ok(indexed)
    }

    fn roll_back(&self, merges: &[MergeResult], document_id: &DocumentId) {
        for merge in merges.iter().rev() {
            if let Err(e) = self.merge_content.release(merge, document_id) {
                tracing::error!(
                    document_id = %document_id,
                    address = %merge.address,
                    error = %e,
                    "Failed to roll back merge"
                );
            }
        }
    }
}
