#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod accuracy;
pub mod array;
pub mod diff;
pub mod fields;
pub mod path;
pub mod report;
pub mod schema;
pub mod text;
pub mod value;

pub use accuracy::{AccuracyResult, DiffStats, NullArrayPolicy, score, score_with};
pub use array::{
    ArrayAccuracyResult, ArrayMatchError, MatchOptions, array_accuracies, match_arrays,
    match_arrays_with,
};
pub use diff::{DiffNode, diff};
pub use fields::count_fields;
pub use path::{FieldPath, PathError};
pub use report::{DocumentPair, DocumentScore, ScoringConfig, score_document};
pub use schema::{SchemaNode, find_array_paths};
pub use text::{levenshtein, text_similarity};
pub use value::{JsonMap, JsonValue};

/// Returns the current version of the verity-core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
