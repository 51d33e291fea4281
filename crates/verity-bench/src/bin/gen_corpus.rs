//! Generates a sample scoring fixture set to disk.
//!
//! Writes a ground-truth document, its OCR-degraded prediction, the matching
//! extraction schema, and both page-text captures to `target/bench-fixtures/`,
//! ready to feed the CLI:
//!
//! ```text
//! cd target/bench-fixtures
//! verity score truth.json prediction.json --schema schema.json \
//!     --expected-text expected.txt --predicted-text predicted.txt
//! ```

use std::error::Error;
use std::fs;
use std::io::BufWriter;

use verity_bench::{
    SizeTier, corpus_dir, generate_document, generate_page_text, perturb_document, perturb_text,
    schema_of,
};
use verity_core::count_fields;

fn main() -> Result<(), Box<dyn Error>> {
    let dir = corpus_dir();
    fs::create_dir_all(&dir)?;

    let config = SizeTier::Medium.config(42);
    eprintln!("Generating medium-tier document pair (seed {})...", config.seed);

    let truth = generate_document(&config);
    let prediction = perturb_document(&truth, &config);
    let schema = schema_of(&truth);
    let expected = generate_page_text(&config);
    let predicted = perturb_text(&expected, &config);

    eprintln!(
        "Ground truth: {} fields, prediction: {} fields, page text: {} bytes",
        count_fields(&truth),
        count_fields(&prediction),
        expected.len()
    );

    serde_json::to_writer_pretty(
        BufWriter::new(fs::File::create(dir.join("truth.json"))?),
        &truth,
    )?;
    serde_json::to_writer_pretty(
        BufWriter::new(fs::File::create(dir.join("prediction.json"))?),
        &prediction,
    )?;
    serde_json::to_writer_pretty(
        BufWriter::new(fs::File::create(dir.join("schema.json"))?),
        &schema,
    )?;
    fs::write(dir.join("expected.txt"), &expected)?;
    fs::write(dir.join("predicted.txt"), &predicted)?;

    eprintln!("Wrote fixture set to {}", dir.display());
    Ok(())
}
