/// Composite scoring: one pass producing everything the benchmark records
/// for a single document.
///
/// Callers hand over the parsed documents plus whatever optional context
/// they have (schema, OCR text) and get back a single serializable record:
/// structural accuracy, per-path array accuracies, and text similarity.
/// Configuration is an explicit parameter — there is no benchmark-wide
/// ambient state.
use std::collections::BTreeMap;

use serde::Serialize;

use crate::accuracy::{AccuracyResult, NullArrayPolicy, score_with};
use crate::array::{ArrayAccuracyResult, MatchOptions, array_accuracies};
use crate::path::FieldPath;
use crate::schema::SchemaNode;
use crate::text::text_similarity;
use crate::value::JsonValue;

/// Everything known about one benchmark document.
///
/// `actual_*` is ground truth, `predicted_*` is provider output. The schema
/// and the raw texts are optional: without a schema no array accuracies are
/// produced, and text similarity needs both texts.
#[derive(Debug, Clone, Copy)]
pub struct DocumentPair<'a> {
    /// Hand-labelled ground-truth JSON.
    pub actual_json: &'a JsonValue,
    /// Provider-extracted JSON.
    pub predicted_json: &'a JsonValue,
    /// Expected-output schema, used only to locate array fields.
    pub schema: Option<&'a SchemaNode>,
    /// Ground-truth document text.
    pub expected_text: Option<&'a str>,
    /// OCR text the provider produced.
    pub predicted_text: Option<&'a str>,
}

/// Knobs for a composite scoring pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringConfig {
    /// Normalization applied to array comparison keys.
    pub array_options: MatchOptions,
    /// Accounting for ground-truth arrays answered by `null`.
    pub null_array_policy: NullArrayPolicy,
}

impl Default for ScoringConfig {
    /// Benchmark-harness defaults: array keys are trimmed and case-folded
    /// (OCR casing is noise at the array level), null'd arrays cost one
    /// modification.
    fn default() -> Self {
        Self {
            array_options: MatchOptions {
                case_sensitive: false,
                trim_whitespace: true,
            },
            null_array_policy: NullArrayPolicy::default(),
        }
    }
}

/// The full scoring record for one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentScore {
    /// Structural accuracy over non-array fields.
    pub json: AccuracyResult,
    /// Order-independent accuracy per schema-declared array path.
    pub arrays: BTreeMap<FieldPath, ArrayAccuracyResult>,
    /// Whole-document text similarity, when both texts were supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_similarity: Option<f64>,
}

/// Runs the complete scoring flow over one document pair.
pub fn score_document(pair: &DocumentPair<'_>, config: &ScoringConfig) -> DocumentScore {
    let json = score_with(pair.actual_json, pair.predicted_json, config.null_array_policy);
    let arrays = match pair.schema {
        Some(schema) => array_accuracies(
            pair.predicted_json,
            pair.actual_json,
            schema,
            &config.array_options,
        ),
        None => BTreeMap::new(),
    };
    let text = match (pair.expected_text, pair.predicted_text) {
        (Some(expected), Some(predicted)) => Some(text_similarity(expected, predicted)),
        _ => None,
    };
    DocumentScore {
        json,
        arrays,
        text_similarity: text,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    fn parse(s: &str) -> JsonValue {
        serde_json::from_str(s).expect("parse test document")
    }

    fn invoice_schema() -> SchemaNode {
        serde_json::from_str(
            r#"{
                "type": "object",
                "properties": {
                    "vendor": {"type": "string"},
                    "total": {"type": "number"},
                    "items": {"type": "array", "items": {"type": "string"}}
                }
            }"#,
        )
        .expect("parse test schema")
    }

    #[test]
    fn full_pass_produces_all_three_sections() {
        let actual = parse(r#"{"vendor": "ACME", "total": 42, "items": ["bolt", "nut"]}"#);
        let predicted = parse(r#"{"vendor": "ACME", "total": 40, "items": ["NUT", "bolt"]}"#);
        let schema = invoice_schema();
        let pair = DocumentPair {
            actual_json: &actual,
            predicted_json: &predicted,
            schema: Some(&schema),
            expected_text: Some("ACME invoice total 42"),
            predicted_text: Some("ACME invoice total 40"),
        };

        let result = score_document(&pair, &ScoringConfig::default());

        // One modified field out of three (items counts as one slot).
        assert_eq!(result.json.score, 0.6667);
        // Case-folded, order-independent array match.
        let items = FieldPath::try_from("items").expect("path");
        assert_eq!(result.arrays[&items].score, 1.0);
        // One character differs out of 21.
        let similarity = result.text_similarity.expect("both texts supplied");
        assert!((similarity - (1.0 - 1.0 / 21.0)).abs() < 1e-12);
    }

    #[test]
    fn sections_degrade_without_schema_or_text() {
        let actual = parse(r#"{"total": 42}"#);
        let predicted = parse(r#"{"total": 42}"#);
        let pair = DocumentPair {
            actual_json: &actual,
            predicted_json: &predicted,
            schema: None,
            expected_text: None,
            predicted_text: Some("orphan text"),
        };

        let result = score_document(&pair, &ScoringConfig::default());
        assert_eq!(result.json.score, 1.0);
        assert!(result.arrays.is_empty());
        assert_eq!(result.text_similarity, None);
    }

    #[test]
    fn null_array_policy_flows_through_config() {
        let actual = parse(r#"{"items": ["a", "b"], "total": 1}"#);
        let predicted = parse(r#"{"items": null, "total": 1}"#);
        let schema = invoice_schema();
        let pair = DocumentPair {
            actual_json: &actual,
            predicted_json: &predicted,
            schema: Some(&schema),
            expected_text: None,
            predicted_text: None,
        };

        let default_score = score_document(&pair, &ScoringConfig::default());
        assert_eq!(default_score.json.score, 0.5);

        let neutral = ScoringConfig {
            null_array_policy: NullArrayPolicy::Neutral,
            ..ScoringConfig::default()
        };
        let neutral_score = score_document(&pair, &neutral);
        assert_eq!(neutral_score.json.score, 1.0);

        // The null'd path resolves to a non-array, so no array verdict.
        assert!(neutral_score.arrays.is_empty());
    }

    #[test]
    fn array_options_flow_through_config() {
        let actual = parse(r#"{"items": ["Apple"]}"#);
        let predicted = parse(r#"{"items": ["APPLE"]}"#);
        let schema = invoice_schema();
        let pair = DocumentPair {
            actual_json: &actual,
            predicted_json: &predicted,
            schema: Some(&schema),
            expected_text: None,
            predicted_text: None,
        };
        let items = FieldPath::try_from("items").expect("path");

        let folded = score_document(&pair, &ScoringConfig::default());
        assert_eq!(folded.arrays[&items].score, 1.0);

        let strict = ScoringConfig {
            array_options: MatchOptions::default(),
            ..ScoringConfig::default()
        };
        let strict_score = score_document(&pair, &strict);
        assert_eq!(strict_score.arrays[&items].score, 0.0);
    }

    #[test]
    fn score_serializes_as_one_record() {
        let actual = parse(r#"{"total": 42}"#);
        let predicted = parse(r#"{"total": 41}"#);
        let pair = DocumentPair {
            actual_json: &actual,
            predicted_json: &predicted,
            schema: None,
            expected_text: None,
            predicted_text: None,
        };
        let rendered = serde_json::to_value(score_document(&pair, &ScoringConfig::default()))
            .expect("serialize document score");
        assert_eq!(
            rendered.get("json").and_then(|j| j.get("score")),
            Some(&serde_json::json!(0.0))
        );
        assert!(rendered.get("text_similarity").is_none());
        assert_eq!(rendered.get("arrays"), Some(&serde_json::json!({})));
    }
}
