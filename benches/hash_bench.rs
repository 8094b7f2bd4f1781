/// Content addressing benchmarks
/// Measures Keccak-256 over whole documents and over record field tuples
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use flow_meta_index::entities::MetaRecord;
use flow_meta_index::infrastructure::hashing::ContentHasher;
use flow_meta_index::value_objects::RAIN_META_DOCUMENT_V1;
use std::hint::black_box;
use std::time::Duration;

fn hash_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("content_address");
    group.measurement_time(Duration::from_secs(5));

    for size in [64, 1024, 64 * 1024, 1024 * 1024] {
        group.throughput(Throughput::Bytes(size as u64));

        let data: Vec<u8> = (0..size).map(|i| (i % 256) as u8).collect();
        group.bench_with_input(BenchmarkId::new("hash_bytes", size), &data, |b, data| {
            b.iter(|| ContentHasher::hash_bytes(black_box(data)))
        });

        let record = MetaRecord::new(
            data.clone(),
            RAIN_META_DOCUMENT_V1,
            "application/json".to_string(),
            "deflate".to_string(),
            "en".to_string(),
        );
        group.bench_with_input(BenchmarkId::new("hash_record", size), &record, |b, record| {
            b.iter(|| ContentHasher::hash_record(black_box(record)))
        });
    }

    group.finish();
}

criterion_group!(benches, hash_benchmarks);
criterion_main!(benches);
