/// Order-independent array accuracy matching.
///
/// Extraction providers routinely return the right line items in the wrong
/// order, so array content is scored by set membership over normalized
/// comparison keys rather than by position. A key is the element's canonical
/// text, optionally trimmed and case-folded; matching is multiset membership
/// (a repeated predicted value matches as often as it appears), deliberately
/// not a one-to-one bipartite assignment.
use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::accuracy::round4;
use crate::path::FieldPath;
use crate::schema::{SchemaNode, find_array_paths};
use crate::value::JsonValue;

// ---------------------------------------------------------------------------
// Options and result types
// ---------------------------------------------------------------------------

/// Normalization switches for building comparison keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
    /// Compare keys with their original case. Off means Unicode lowercasing
    /// is applied to both sides.
    pub case_sensitive: bool,
    /// Strip leading and trailing whitespace from keys.
    pub trim_whitespace: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            case_sensitive: true,
            trim_whitespace: true,
        }
    }
}

/// Order-independent accuracy verdict for one array field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayAccuracyResult {
    /// `matched_items / total_items` rounded to 4 decimal digits; 1.0 when
    /// both arrays are empty.
    pub score: f64,
    /// Predicted elements whose key exists anywhere in the ground truth.
    pub matched_items: usize,
    /// `max(len(predicted), len(actual))`.
    pub total_items: usize,
    /// Ground-truth elements absent from the prediction, original values in
    /// original order.
    pub missing_items: Vec<JsonValue>,
    /// Predicted elements absent from the ground truth, original values in
    /// original order.
    pub extra_items: Vec<JsonValue>,
}

/// Errors produced when the matcher is handed a non-array input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArrayMatchError {
    /// An input that must be an array was something else.
    InputNotArray {
        /// Which argument was rejected: `"predicted"` or `"actual"`.
        input: &'static str,
        /// Variant name of what was found instead.
        found: &'static str,
    },
}

impl std::fmt::Display for ArrayMatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InputNotArray { input, found } => {
                write!(f, "{input} input must be an array, got {found}")
            }
        }
    }
}

impl std::error::Error for ArrayMatchError {}

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------

/// Builds the comparison key for one element.
fn normalize_item(item: &JsonValue, options: &MatchOptions) -> String {
    let text = item.canonical_text();
    let trimmed = if options.trim_whitespace {
        text.trim().to_owned()
    } else {
        text
    };
    if options.case_sensitive {
        trimmed
    } else {
        trimmed.to_lowercase()
    }
}

/// Core matching over already-validated element slices.
fn match_items(
    predicted: &[JsonValue],
    actual: &[JsonValue],
    options: &MatchOptions,
) -> ArrayAccuracyResult {
    let normalized_predicted: Vec<String> =
        predicted.iter().map(|item| normalize_item(item, options)).collect();
    let normalized_actual: Vec<String> =
        actual.iter().map(|item| normalize_item(item, options)).collect();

    let predicted_keys: HashSet<&str> = normalized_predicted.iter().map(String::as_str).collect();
    let actual_keys: HashSet<&str> = normalized_actual.iter().map(String::as_str).collect();

    let matched_items = normalized_predicted
        .iter()
        .filter(|key| actual_keys.contains(key.as_str()))
        .count();

    let missing_items: Vec<JsonValue> = actual
        .iter()
        .zip(&normalized_actual)
        .filter(|(_, key)| !predicted_keys.contains(key.as_str()))
        .map(|(item, _)| item.clone())
        .collect();
    let extra_items: Vec<JsonValue> = predicted
        .iter()
        .zip(&normalized_predicted)
        .filter(|(_, key)| !actual_keys.contains(key.as_str()))
        .map(|(item, _)| item.clone())
        .collect();

    let total_items = predicted.len().max(actual.len());
    let score = if total_items == 0 {
        1.0
    } else {
        round4(matched_items as f64 / total_items as f64)
    };

    ArrayAccuracyResult {
        score,
        matched_items,
        total_items,
        missing_items,
        extra_items,
    }
}

fn require_array<'a>(
    value: &'a JsonValue,
    input: &'static str,
) -> Result<&'a Vec<JsonValue>, ArrayMatchError> {
    value.as_array().ok_or(ArrayMatchError::InputNotArray {
        input,
        found: value.type_name(),
    })
}

/// Scores a predicted array against a ground-truth array with the default
/// options (case-sensitive, trimmed).
pub fn match_arrays(
    predicted: &JsonValue,
    actual: &JsonValue,
) -> Result<ArrayAccuracyResult, ArrayMatchError> {
    match_arrays_with(predicted, actual, &MatchOptions::default())
}

/// Scores a predicted array against a ground-truth array.
///
/// Both inputs must be [`JsonValue::Array`]; anything else is rejected with
/// [`ArrayMatchError::InputNotArray`]. Object-valued elements compare by
/// their canonical text, exact match or nothing — there is no partial credit
/// within an element.
pub fn match_arrays_with(
    predicted: &JsonValue,
    actual: &JsonValue,
    options: &MatchOptions,
) -> Result<ArrayAccuracyResult, ArrayMatchError> {
    let predicted_items = require_array(predicted, "predicted")?;
    let actual_items = require_array(actual, "actual")?;
    Ok(match_items(predicted_items, actual_items, options))
}

// ---------------------------------------------------------------------------
// Schema-driven composition
// ---------------------------------------------------------------------------

fn array_at<'a>(document: &'a JsonValue, path: &FieldPath) -> Option<&'a Vec<JsonValue>> {
    document.get_path(path).and_then(JsonValue::as_array)
}

/// Scores every array field the schema declares, keyed by its dotted path.
///
/// A path is silently skipped when either document is missing it or holds a
/// non-array there — the structural differ already accounts for that field.
pub fn array_accuracies(
    predicted: &JsonValue,
    actual: &JsonValue,
    schema: &SchemaNode,
    options: &MatchOptions,
) -> BTreeMap<FieldPath, ArrayAccuracyResult> {
    let mut results = BTreeMap::new();
    for path in find_array_paths(schema) {
        let Some(predicted_items) = array_at(predicted, &path) else {
            continue;
        };
        let Some(actual_items) = array_at(actual, &path) else {
            continue;
        };
        results.insert(path, match_items(predicted_items, actual_items, options));
    }
    results
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
