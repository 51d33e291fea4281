//! Synthetic extraction-corpus generator.
//!
//! Builds invoice-shaped ground-truth documents with matching schemas and
//! page text, then degrades copies of them the way an OCR pipeline would.
//! Everything is seed-driven: the same configuration always yields the
//! same bytes, so benchmarks and property tests stay reproducible.

pub mod document;
pub mod noise;

use rand::SeedableRng;
use rand::rngs::StdRng;
use verity_core::JsonValue;

pub use document::schema_of;

/// Knobs for one generated document pair.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// RNG seed; same seed, same output.
    pub seed: u64,
    /// Extra scalar fields at the document root.
    pub num_header_fields: usize,
    /// Nested section objects at the document root.
    pub num_sections: usize,
    /// Scalar fields inside each section level.
    pub fields_per_section: usize,
    /// Nesting depth of each section (1 = flat).
    pub section_depth: usize,
    /// Array fields overall: one root `line_items`, the rest land one per
    /// section.
    pub num_arrays: usize,
    /// Items in each generated array.
    pub items_per_array: usize,
    /// Probability (0.0-1.0) that the degraded copy loses a field.
    pub field_drop_rate: f64,
    /// Probability (0.0-1.0) that a scalar is misread.
    pub mutation_rate: f64,
    /// Probability (0.0-1.0) that a junk field is invented.
    pub insertion_rate: f64,
    /// Probability (0.0-1.0) that an array comes back as null.
    pub null_array_rate: f64,
    /// Probability (0.0-1.0) of case or padding noise on array items.
    pub case_noise_rate: f64,
    /// Bytes of OCR page text to generate (ASCII).
    pub text_len: usize,
    /// Per-character error probability (0.0-1.0) for the scanned text.
    pub text_error_rate: f64,
}

/// Document sizes used by the benchmarks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeTier {
    /// ~30 fields, two small arrays.
    Small,
    /// ~160 fields, six arrays.
    Medium,
    /// ~800 fields, sixteen arrays.
    Large,
    /// ~2900 fields, forty arrays.
    XLarge,
}

impl SizeTier {
    /// Returns the default `GeneratorConfig` for this size tier.
    pub fn config(self, seed: u64) -> GeneratorConfig {
        match self {
            SizeTier::Small => GeneratorConfig {
                seed,
                num_header_fields: 6,
                num_sections: 2,
                fields_per_section: 5,
                section_depth: 1,
                num_arrays: 2,
                items_per_array: 5,
                field_drop_rate: 0.05,
                mutation_rate: 0.10,
                insertion_rate: 0.03,
                null_array_rate: 0.10,
                case_noise_rate: 0.20,
                text_len: 400,
                text_error_rate: 0.02,
            },
            SizeTier::Medium => GeneratorConfig {
                seed,
                num_header_fields: 20,
                num_sections: 8,
                fields_per_section: 8,
                section_depth: 2,
                num_arrays: 6,
                items_per_array: 25,
                field_drop_rate: 0.05,
                mutation_rate: 0.10,
                insertion_rate: 0.03,
                null_array_rate: 0.10,
                case_noise_rate: 0.20,
                text_len: 4_000,
                text_error_rate: 0.02,
            },
            SizeTier::Large => GeneratorConfig {
                seed,
                num_header_fields: 60,
                num_sections: 20,
                fields_per_section: 12,
                section_depth: 3,
                num_arrays: 16,
                items_per_array: 80,
                field_drop_rate: 0.05,
                mutation_rate: 0.10,
                insertion_rate: 0.03,
                null_array_rate: 0.10,
                case_noise_rate: 0.20,
                text_len: 20_000,
                text_error_rate: 0.02,
            },
            SizeTier::XLarge => GeneratorConfig {
                seed,
                num_header_fields: 150,
                num_sections: 60,
                fields_per_section: 15,
                section_depth: 3,
                num_arrays: 40,
                items_per_array: 200,
                field_drop_rate: 0.05,
                mutation_rate: 0.10,
                insertion_rate: 0.03,
                null_array_rate: 0.10,
                case_noise_rate: 0.20,
                text_len: 80_000,
                text_error_rate: 0.02,
            },
        }
    }
}

/// Generates the ground-truth document for `config`.
///
/// All randomness is deterministic, seeded from `config.seed`.
pub fn generate_document(config: &GeneratorConfig) -> JsonValue {
    let mut rng = StdRng::seed_from_u64(config.seed);
    document::build_document(config, &mut rng)
}

/// Generates a standalone line-item array of `len` entries.
pub fn generate_items(seed: u64, len: usize) -> JsonValue {
    let mut rng = StdRng::seed_from_u64(seed);
    JsonValue::Array(document::gen_line_items(&mut rng, len))
}

/// Generates the page text a clean scan of the document would carry.
pub fn generate_page_text(config: &GeneratorConfig) -> String {
    let mut rng = StdRng::seed_from_u64(config.seed);
    document::build_page_text(config, &mut rng)
}

/// Stream separator so noise draws do not mirror generation draws made
/// from the same seed.
const NOISE_STREAM: u64 = 0x9e37_79b9_7f4a_7c15;

/// Degrades a ground-truth document into a plausible extraction result:
/// fields dropped, scalars misread, junk fields invented, arrays nulled or
/// reshuffled. At least one structural edit is always landed so a generated
/// pair never collapses to the identical-document case. Deterministic for
/// a given document and seed.
pub fn perturb_document(document: &JsonValue, config: &GeneratorConfig) -> JsonValue {
    let mut rng = StdRng::seed_from_u64(config.seed ^ NOISE_STREAM);
    noise::apply_document_noise(document, config, &mut rng)
}

/// Degrades page text with character-level scanner errors.
pub fn perturb_text(text: &str, config: &GeneratorConfig) -> String {
    let mut rng = StdRng::seed_from_u64(config.seed ^ NOISE_STREAM);
    noise::apply_text_noise(text, config, &mut rng)
}
