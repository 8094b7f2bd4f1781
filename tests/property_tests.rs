//! Property-based tests using proptest
//!
//! These tests generate many random inputs to check the invariants of the
//! hex helpers, the content hasher and the ingestion pipeline.

use proptest::prelude::*;
use std::collections::HashSet;

use flow_meta_index::application::errors::{IngestOutcome, SkipReason};
use flow_meta_index::application::ports::ContentRepository;
use flow_meta_index::domain::entities::MetaRecord;
use flow_meta_index::domain::validation::Validation;
use flow_meta_index::domain::value_objects::{DocumentId, MagicNumber, RAIN_META_DOCUMENT_V1};
use flow_meta_index::infrastructure::codec::{DecodeLimits, MetaDecoder};
use flow_meta_index::infrastructure::hashing::ContentHasher;

use test_fixtures::{meta_document, ItemSpec, TestEnvironment};

/// Strategy for generating valid record field tuples
fn record_strategy() -> impl Strategy<Value = MetaRecord> {
    (
        prop::collection::vec(any::<u8>(), 1..64),
        any::<u64>(),
        "[a-z/+-]{0,16}",
        "[a-z]{0,8}",
        "[a-z]{0,4}",
    )
        .prop_map(|(payload, magic, content_type, encoding, language)| {
            MetaRecord::new(payload, MagicNumber::new(magic), content_type, encoding, language)
        })
}

fn item_for(record: &MetaRecord) -> ItemSpec {
    let mut item = ItemSpec::new(record.payload(), record.magic_number().value());
    if !record.content_type().is_empty() {
        item = item.content_type(record.content_type());
    }
    if !record.content_encoding().is_empty() {
        item = item.content_encoding(record.content_encoding());
    }
    if !record.content_language().is_empty() {
        item = item.content_language(record.content_language());
    }
    item
}

proptest! {
    #[test]
    fn prop_quoted_hex_round_trip(bytes in prop::collection::vec(any::<u8>(), 1..256)) {
        let quoted = format!("h'{}'", hex::encode(&bytes));
        prop_assert_eq!(Validation::decode_quoted_hex(&quoted, "payload").unwrap(), bytes.clone());

        let upper = format!("h'{}'", hex::encode_upper(&bytes));
        prop_assert_eq!(Validation::decode_quoted_hex(&upper, "payload").unwrap(), bytes);
    }

    #[test]
    fn prop_non_hex_characters_rejected(
        prefix in "[0-9a-f]{0,8}",
        bad in "[g-zG-Z ]",
        suffix in "[0-9a-f]{0,8}",
    ) {
        let quoted = format!("h'{}{}{}'", prefix, bad, suffix);
        prop_assert!(Validation::decode_quoted_hex(&quoted, "payload").is_err());
    }

    #[test]
    fn prop_even_length_normalization(digits in "[0-9a-f]{1,64}") {
        let normalized = Validation::normalize_even_length(&digits);
        prop_assert_eq!(normalized.len() % 2, 0);
        prop_assert!(normalized.ends_with(&digits));
    }

    #[test]
    fn prop_hash_is_deterministic(record in record_strategy()) {
        let first = ContentHasher::hash_record(&record);
        let second = ContentHasher::hash_record(&record.clone());
        prop_assert_eq!(first.as_hex().len(), 64);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_magic_number_prefix_recognized(body in prop::collection::vec(any::<u8>(), 0..64)) {
        let mut meta = RAIN_META_DOCUMENT_V1.value().to_be_bytes().to_vec();
        meta.extend_from_slice(&body);
        prop_assert_eq!(RAIN_META_DOCUMENT_V1.strip_from(&meta), Some(body.as_slice()));
    }

    #[test]
    fn prop_decoder_never_panics(input in prop::collection::vec(any::<u8>(), 0..128)) {
        let _ = MetaDecoder::new(DecodeLimits::default()).decode(&input);
    }

    #[test]
    fn prop_ingest_twice_is_idempotent(records in prop::collection::vec(record_strategy(), 1..6)) {
        let env = TestEnvironment::new();
        let items: Vec<_> = records.iter().map(item_for).collect();
        let meta = meta_document(&items);
        let id = DocumentId::new("tx1").unwrap();

        let first = env.state.ingest_use_case.execute(&meta, &id).unwrap();
        prop_assert!(first.is_indexed());
        let snapshot = env.content_repo.find_by_document(&id).unwrap();

        env.state.ingest_use_case.execute(&meta, &id).unwrap();
        prop_assert_eq!(env.content_repo.find_by_document(&id).unwrap(), snapshot);

        // The first record under an address is the one stored
        let mut seen = HashSet::new();
        for record in &records {
            let address = ContentHasher::hash_record(record);
            if !seen.insert(address.clone()) {
                continue;
            }
            let entry = env.content_repo.find_by_address(&address).unwrap();
            prop_assert_eq!(entry.map(|e| e.record().clone()), Some(record.clone()));
        }
    }

    #[test]
    fn prop_one_bad_item_rejects_document(
        records in prop::collection::vec(record_strategy(), 1..6),
        position in any::<prop::sample::Index>(),
    ) {
        let env = TestEnvironment::new();
        let mut items: Vec<_> = records.iter().map(item_for).collect();
        let bad = position.index(items.len());
        items[bad] = items[bad].clone().without_magic_number();
        let id = DocumentId::new("tx1").unwrap();

        let outcome = env.state.ingest_use_case.execute(&meta_document(&items), &id).unwrap();

        prop_assert!(
            matches!(outcome, IngestOutcome::Skipped(SkipReason::ValidationFailure(_))),
            "unexpected outcome {:?}",
            outcome
        );
        prop_assert_eq!(env.content_repo.count().unwrap(), 0);
    }

    #[test]
    fn prop_store_failure_leaves_no_trace(
        records in prop::collection::vec(record_strategy(), 1..6),
        position in any::<prop::sample::Index>(),
    ) {
        let fail_on = position.index(records.len()) + 1;
        let env = TestEnvironment::with_failing_merge(fail_on);
        let items: Vec<_> = records.iter().map(item_for).collect();
        let id = DocumentId::new("tx1").unwrap();

        let result = env.state.ingest_use_case.execute(&meta_document(&items), &id);

        prop_assert!(result.is_err());
        prop_assert_eq!(env.content_repo.count().unwrap(), 0);
        prop_assert!(env.content_repo.find_by_document(&id).unwrap().is_empty());
        prop_assert_eq!(env.document_count(), 0);
    }
}
