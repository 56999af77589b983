//! Locate Performance Benchmarks
//!
//! Snippet search over synthetic pages and location cache throughput.
//!
//! Run with: `cargo bench --bench locate_performance`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::time::Duration;

use highlight_locator::document::{BoundingBox, TextLocation, TextRun};
use highlight_locator::locate::SnippetLocator;
use highlight_locator::LocationCache;

/// Build a page of `run_count` short runs laid out in lines of ten
fn create_page(run_count: usize) -> Vec<TextRun> {
    (0..run_count)
        .map(|i| {
            let column = (i % 10) as f32;
            let line = (i / 10) as f32;
            TextRun::new(format!("word{} ", i), 72.0 + column * 45.0, 720.0 - line * 14.0, 45.0, 12.0)
        })
        .collect()
}

/// Benchmark a snippet at the end of the page (worst case full scan)
fn bench_locate(c: &mut Criterion) {
    let mut group = c.benchmark_group("locate");
    group.measurement_time(Duration::from_secs(10));

    let locator = SnippetLocator::default();
    for run_count in [100usize, 1_000, 5_000] {
        let page = create_page(run_count);
        let snippet = format!("word{} word{}", run_count - 2, run_count - 1);

        group.throughput(Throughput::Elements(run_count as u64));
        group.bench_with_input(BenchmarkId::new("tail_match", run_count), &page, |b, page| {
            b.iter(|| black_box(locator.locate(black_box(page), black_box(&snippet))))
        });
        group.bench_with_input(BenchmarkId::new("no_match", run_count), &page, |b, page| {
            b.iter(|| black_box(locator.locate(black_box(page), black_box("coinsurance"))))
        });
    }

    group.finish();
}

/// Benchmark cache churn at default capacity
fn bench_cache(c: &mut Criterion) {
    let mut group = c.benchmark_group("location_cache");

    let cache = LocationCache::default();
    let location = TextLocation {
        text: "premium".to_string(),
        page: 1,
        bbox: BoundingBox::new(72.0, 80.0, 95.0, 14.0),
    };
    let keys: Vec<String> = (0..500).map(|i| format!("field {}", i)).collect();

    group.bench_function("set_get_churn", |b| {
        b.iter(|| {
            for key in &keys {
                cache.set("bench-doc", 1, key, location.clone());
                black_box(cache.get("bench-doc", 1, key));
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_locate, bench_cache);
criterion_main!(benches);
