use std::sync::Arc;

use crate::application::errors::{IngestError, MergeResult};
use crate::application::ports::{ContentRepository, MergeOutcome};
use crate::domain::entities::MetaRecord;
use crate::domain::value_objects::DocumentId;
use crate::infrastructure::hashing::ContentHasher;

/// Use case: Merge one validated record into the content store
pub struct MergeContentUseCase {
    content_repo: Arc<dyn ContentRepository>,
}

impl MergeContentUseCase {
    pub fn new(content_repo: Arc<dyn ContentRepository>) -> Self {
        Self { content_repo }
    }

    /// Address the record and merge it under `document_id`.
    ///
    /// Repeating the same pair is a no-op reported as `Unchanged`.
    pub fn execute(
        &self,
        record: &MetaRecord,
        document_id: &DocumentId,
    ) -> Result<MergeResult, IngestError> {
        let address = ContentHasher::hash_record(record);
        let outcome = self.content_repo.merge(&address, record, document_id)?;

        tracing::trace!(
            address = %address,
            document_id = %document_id,
            outcome = ?outcome,
            "Merged content record"
        );

        Ok(MergeResult { address, outcome })
    }

    /// Undo a merge made for `document_id`. `Unchanged` merges wrote
    /// nothing and are left alone.
    pub fn release(&self, merge: &MergeResult, document_id: &DocumentId) -> Result<(), IngestError> {
        if merge.outcome == MergeOutcome::Unchanged {
            return Ok(());
        }
        self.content_repo.release(&merge.address, document_id)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockContentRepository, RepositoryError};
    use crate::domain::value_objects::MagicNumber;
    use mockall::predicate::*;

    fn record() -> MetaRecord {
        MetaRecord::bare(vec![0xde, 0xad, 0xbe, 0xef], MagicNumber::new(7))
    }

    #[test]
    fn test_merge_passes_record_address() {
        let mut mock_content_repo = MockContentRepository::new();
        let expected = ContentHasher::hash_record(&record());
        let doc_id = DocumentId::new("tx1").unwrap();

        mock_content_repo
            .expect_merge()
            .with(eq(expected.clone()), eq(record()), eq(doc_id.clone()))
            .times(1)
            .returning(|_, _, _| Ok(MergeOutcome::Created));

        let use_case = MergeContentUseCase::new(Arc::new(mock_content_repo));
        let result = use_case.execute(&record(), &doc_id).unwrap();

        assert_eq!(result.address, expected);
        assert_eq!(result.outcome, MergeOutcome::Created);
    }

    #[test]
    fn test_merge_propagates_conflict() {
        let mut mock_content_repo = MockContentRepository::new();
        mock_content_repo
            .expect_merge()
            .times(1)
            .returning(|_, _, _| Err(RepositoryError::Conflict("collision".to_string())));

        let use_case = MergeContentUseCase::new(Arc::new(mock_content_repo));
        let result = use_case.execute(&record(), &DocumentId::new("tx1").unwrap());

        assert!(matches!(
            result,
            Err(IngestError::Repository(RepositoryError::Conflict(_)))
        ));
    }

    #[test]
    fn test_release_skips_unchanged_merges() {
        let mut mock_content_repo = MockContentRepository::new();
        let doc_id = DocumentId::new("tx1").unwrap();
        let address = ContentHasher::hash_record(&record());

        mock_content_repo
            .expect_release()
            .with(eq(address.clone()), eq(doc_id.clone()))
            .times(1)
            .returning(|_, _| Ok(()));

        let use_case = MergeContentUseCase::new(Arc::new(mock_content_repo));
        for outcome in [MergeOutcome::Created, MergeOutcome::Unchanged] {
            let merge = MergeResult {
                address: address.clone(),
                outcome,
            };
            use_case.release(&merge, &doc_id).unwrap();
        }
    }
}
