//! Character-level text similarity benchmarks.
//!
//! The Levenshtein kernel is quadratic, so sizes here stay well below the
//! document tiers' page lengths.
#![allow(clippy::expect_used)]

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use verity_bench::{SizeTier, generate_page_text, perturb_text};
use verity_core::{levenshtein, text_similarity};

fn bench_text_similarity(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_similarity");

    for (name, len) in [("400", 400), ("1k", 1_000), ("4k", 4_000)] {
        let mut config = SizeTier::Small.config(42);
        config.text_len = len;
        let page = generate_page_text(&config);
        let scanned = perturb_text(&page, &config);

        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::new("identical", name), &page, |b, page| {
            b.iter(|| {
                let _ = text_similarity(page, page);
            });
        });

        group.bench_with_input(
            BenchmarkId::new("scanned", name),
            &scanned,
            |b, scanned| {
                b.iter(|| {
                    let _ = text_similarity(&page, scanned);
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("distance", name),
            &scanned,
            |b, scanned| {
                b.iter(|| {
                    let _ = levenshtein(&page, scanned);
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_text_similarity);
criterion_main!(benches);
