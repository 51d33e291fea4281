//! Benchmark corpus and invariant tooling for `verity-core`.
//!
//! Provides deterministic generation of invoice-shaped ground-truth
//! documents, matching schemas, OCR-degraded predictions, and page text,
//! plus post-operation invariant checkers. The benches and property tests
//! in this crate drive the scoring pipeline with this generated data.

use std::path::PathBuf;

pub mod correctness;
pub mod generator;

pub use generator::{
    GeneratorConfig, SizeTier, generate_document, generate_items, generate_page_text,
    perturb_document, perturb_text, schema_of,
};

/// Returns the directory where generated scoring fixtures are written.
///
/// The files live under `target/bench-fixtures/` so they are automatically
/// gitignored. `gen-corpus` writes a ready-made CLI input set there.
pub fn corpus_dir() -> PathBuf {
    let manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest
        .join("..")
        .join("..")
        .join("target")
        .join("bench-fixtures")
}
