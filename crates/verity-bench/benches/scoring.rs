//! Structural scoring benchmarks over generated document pairs.
#![allow(clippy::expect_used)]

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use verity_bench::{SizeTier, generate_document, perturb_document, schema_of};
use verity_core::{
    DocumentPair, NullArrayPolicy, ScoringConfig, count_fields, score, score_document, score_with,
};

fn bench_scoring(c: &mut Criterion) {
    let mut group = c.benchmark_group("scoring");

    for (name, tier) in [
        ("S", SizeTier::Small),
        ("M", SizeTier::Medium),
        ("L", SizeTier::Large),
        ("XL", SizeTier::XLarge),
    ] {
        let config = tier.config(42);
        let truth = generate_document(&config);
        let predicted = perturb_document(&truth, &config);
        let schema = schema_of(&truth);
        let elements = count_fields(&truth) as u64;

        group.throughput(Throughput::Elements(elements));

        group.bench_with_input(BenchmarkId::new("identical", name), &truth, |b, truth| {
            b.iter(|| {
                let _ = score(truth, truth);
            });
        });

        group.bench_with_input(
            BenchmarkId::new("perturbed", name),
            &predicted,
            |b, predicted| {
                b.iter(|| {
                    let _ = score(&truth, predicted);
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("penalize_items", name),
            &predicted,
            |b, predicted| {
                b.iter(|| {
                    let _ = score_with(&truth, predicted, NullArrayPolicy::PenalizeItems);
                });
            },
        );

        // Schema-driven report without page text; the quadratic text kernel
        // has its own bench.
        group.bench_with_input(
            BenchmarkId::new("document_report", name),
            &predicted,
            |b, predicted| {
                let scoring = ScoringConfig::default();
                let pair = DocumentPair {
                    actual_json: &truth,
                    predicted_json: predicted,
                    schema: Some(&schema),
                    expected_text: None,
                    predicted_text: None,
                };
                b.iter(|| {
                    let _ = score_document(&pair, &scoring);
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_scoring);
criterion_main!(benches);
