use std::sync::Arc;

use crate::application::dto::{ContentEntryDto, DocumentDto};
use crate::application::errors::QueryError;
use crate::application::ports::{ContentRepository, DocumentRepository};
use crate::domain::value_objects::{ContentAddress, DocumentId};

/// Use case: Read content entries and documents back out of the stores
pub struct QueryContentUseCase {
    content_repo: Arc<dyn ContentRepository>,
    document_repo: Arc<dyn DocumentRepository>,
}

impl QueryContentUseCase {
    pub fn new(
        content_repo: Arc<dyn ContentRepository>,
        document_repo: Arc<dyn DocumentRepository>,
    ) -> Self {
        Self {
            content_repo,
            document_repo,
        }
    }

    /// Look up an entry by hex address (`0x` prefix and uppercase allowed)
    pub fn content_by_address(&self, address: &str) -> Result<ContentEntryDto, QueryError> {
        let address = ContentAddress::from_hex(address.to_string())?;

        self.content_repo
            .find_by_address(&address)?
            .map(ContentEntryDto::from)
            .ok_or_else(|| QueryError::NotFound(address.to_prefixed_hex()))
    }

    /// Every entry a document references, ordered by address
    pub fn content_for_document(&self, document_id: &str) -> Result<Vec<ContentEntryDto>, QueryError> {
        let document_id = DocumentId::new(document_id)?;

        let entries = self.content_repo.find_by_document(&document_id)?;
        Ok(entries.into_iter().map(ContentEntryDto::from).collect())
    }

    /// Look up a stored document by the hex address of its bytes
    pub fn document(&self, address: &str) -> Result<DocumentDto, QueryError> {
        let address = ContentAddress::from_hex(address.to_string())?;

        self.document_repo
            .find_by_address(&address)?
            .map(DocumentDto::from)
            .ok_or_else(|| QueryError::NotFound(address.to_prefixed_hex()))
    }

    /// Every document seen under a document ID, ordered by address
    pub fn documents_for(&self, document_id: &str) -> Result<Vec<DocumentDto>, QueryError> {
        let document_id = DocumentId::new(document_id)?;

        let documents = self.document_repo.find_by_source(&document_id)?;
        Ok(documents.into_iter().map(DocumentDto::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockContentRepository, MockDocumentRepository};
    use crate::domain::entities::{ContentEntry, Document, MetaRecord};
    use bytes::Bytes;
    use crate::domain::value_objects::MagicNumber;

    fn entry(byte: u8, doc: &str) -> ContentEntry {
        ContentEntry::new(
            ContentAddress::from_digest([byte; 32]),
            MetaRecord::bare(vec![byte], MagicNumber::new(7)),
            DocumentId::new(doc).unwrap(),
        )
    }

    #[test]
    fn test_content_by_address_found() {
        let mut mock_content_repo = MockContentRepository::new();
        mock_content_repo
            .expect_find_by_address()
            .times(1)
            .returning(|address| {
                assert_eq!(address.as_hex(), "11".repeat(32));
                Ok(Some(entry(0x11, "tx1")))
            });

        let use_case = QueryContentUseCase::new(
            Arc::new(mock_content_repo),
            Arc::new(MockDocumentRepository::new()),
        );
        let dto = use_case
            .content_by_address(&format!("0x{}", "1".repeat(64).to_uppercase()))
            .unwrap();

        assert_eq!(dto.payload, "0x11");
        assert_eq!(dto.documents, vec!["tx1"]);
    }

    #[test]
    fn test_content_by_address_not_found() {
        let mut mock_content_repo = MockContentRepository::new();
        mock_content_repo
            .expect_find_by_address()
            .returning(|_| Ok(None));

        let use_case = QueryContentUseCase::new(
            Arc::new(mock_content_repo),
            Arc::new(MockDocumentRepository::new()),
        );

        assert!(matches!(
            use_case.content_by_address(&"22".repeat(32)),
            Err(QueryError::NotFound(_))
        ));
    }

    #[test]
    fn test_invalid_address_rejected_before_lookup() {
        let mut mock_content_repo = MockContentRepository::new();
        mock_content_repo.expect_find_by_address().never();

        let use_case = QueryContentUseCase::new(
            Arc::new(mock_content_repo),
            Arc::new(MockDocumentRepository::new()),
        );

        assert!(matches!(
            use_case.content_by_address("not-hex"),
            Err(QueryError::Domain(_))
        ));
    }

    #[test]
    fn test_content_for_document() {
        let mut mock_content_repo = MockContentRepository::new();
        mock_content_repo
            .expect_find_by_document()
            .times(1)
            .returning(|_| Ok(vec![entry(0x01, "tx1"), entry(0x02, "tx1")]));

        let use_case = QueryContentUseCase::new(
            Arc::new(mock_content_repo),
            Arc::new(MockDocumentRepository::new()),
        );
        let dtos = use_case.content_for_document("tx1").unwrap();

        assert_eq!(dtos.len(), 2);
        assert!(dtos[0].address < dtos[1].address);
    }

    #[test]
    fn test_document_not_found() {
        let mut mock_document_repo = MockDocumentRepository::new();
        mock_document_repo
            .expect_find_by_address()
            .times(1)
            .returning(|_| Ok(None));

        let use_case = QueryContentUseCase::new(
            Arc::new(MockContentRepository::new()),
            Arc::new(mock_document_repo),
        );

        assert!(matches!(
            use_case.document(&"33".repeat(32)),
            Err(QueryError::NotFound(_))
        ));
        assert!(matches!(use_case.document("tx9"), Err(QueryError::Domain(_))));
    }

    #[test]
    fn test_documents_for_source() {
        let mut mock_document_repo = MockDocumentRepository::new();
        mock_document_repo
            .expect_find_by_source()
            .times(1)
            .returning(|id| {
                let mut doc = Document::new(
                    ContentAddress::from_digest([0x44; 32]),
                    Bytes::from_static(&[0x01]),
                );
                doc.add_source(id.clone());
                Ok(vec![doc])
            });

        let use_case = QueryContentUseCase::new(
            Arc::new(MockContentRepository::new()),
            Arc::new(mock_document_repo),
        );
        let dtos = use_case.documents_for("tx1").unwrap();

        assert_eq!(dtos.len(), 1);
        assert_eq!(dtos[0].sources, vec!["tx1"]);
    }
}
