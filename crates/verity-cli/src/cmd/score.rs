//! Implementation of `verity score <truth> <prediction>`.
//!
//! Parses both JSON documents, optionally a schema and a raw text pair, runs
//! the composite scorer, and writes the combined record to stdout.
//!
//! Flags:
//! - `--schema <FILE>`: locate array fields for order-independent scoring.
//! - `--expected-text <FILE>` / `--predicted-text <FILE>`: raw document text;
//!   similarity is reported only when both are given.
//! - `--case-sensitive-arrays`, `--no-trim`: array item normalization.
//! - `--null-array-policy <POLICY>`: accounting for null'd array fields.
//! - `--min-score <F>`: exit 1 when the structural score falls below F.
//!
//! Exit codes:
//! - 0 = scored (and at or above the threshold, when one is set)
//! - 1 = structural score below `--min-score`
//! - 2 = input failure
use verity_core::{
    DocumentPair, DocumentScore, JsonValue, ScoringConfig, SchemaNode, score_document,
};

use crate::OutputFormat;
use crate::error::CliError;

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

/// Raw input text for one scoring run.
pub struct ScoreInputs<'a> {
    /// Ground-truth JSON text.
    pub actual: &'a str,
    /// Predicted JSON text.
    pub predicted: &'a str,
    /// Schema JSON text, when `--schema` was given.
    pub schema: Option<&'a str>,
    /// Ground-truth document text.
    pub expected_text: Option<&'a str>,
    /// Provider-transcribed document text.
    pub predicted_text: Option<&'a str>,
}

/// Runs the `score` command.
///
/// Parses the inputs, runs [`score_document`], and writes the record to
/// stdout in the requested format. When `min_score` is set the structural
/// score is checked after the output is written, so the record is always
/// available to the caller even on a failing gate.
///
/// # Errors
///
/// - [`CliError::ParseFailed`] — an input is not valid JSON.
/// - [`CliError::ScoreBelowThreshold`] — the `--min-score` gate failed.
/// - [`CliError::IoError`] — stdout write failed.
pub fn run(
    inputs: &ScoreInputs<'_>,
    config: &ScoringConfig,
    min_score: Option<f64>,
    format: &OutputFormat,
) -> Result<(), CliError> {
    let actual = parse_document(inputs.actual, "ground truth")?;
    let predicted = parse_document(inputs.predicted, "prediction")?;
    let schema = inputs.schema.map(parse_schema).transpose()?;

    let pair = DocumentPair {
        actual_json: &actual,
        predicted_json: &predicted,
        schema: schema.as_ref(),
        expected_text: inputs.expected_text,
        predicted_text: inputs.predicted_text,
    };
    let result = score_document(&pair, config);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Human => print_human(&mut out, &result),
        OutputFormat::Json => print_json(&mut out, &result),
    }
    .map_err(|e| CliError::IoError {
        source: "stdout".to_owned(),
        detail: e.to_string(),
    })?;

    if let Some(threshold) = min_score {
        if result.json.score < threshold {
            return Err(CliError::ScoreBelowThreshold {
                score: result.json.score,
                threshold,
            });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

fn parse_document(text: &str, label: &str) -> Result<JsonValue, CliError> {
    serde_json::from_str(text).map_err(|e| CliError::ParseFailed {
        source: label.to_owned(),
        detail: format!("line {}, column {}: {e}", e.line(), e.column()),
    })
}

fn parse_schema(text: &str) -> Result<SchemaNode, CliError> {
    serde_json::from_str(text).map_err(|e| CliError::ParseFailed {
        source: "schema".to_owned(),
        detail: format!("line {}, column {}: {e}", e.line(), e.column()),
    })
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Writes the score record as aligned human-readable lines.
fn print_human<W: std::io::Write>(w: &mut W, result: &DocumentScore) -> std::io::Result<()> {
    writeln!(
        w,
        "structural: {:.4}  ({} changes / {} fields)",
        result.json.score, result.json.stats.total, result.json.total_fields
    )?;
    if !result.arrays.is_empty() {
        writeln!(w, "arrays:")?;
        for (path, verdict) in &result.arrays {
            writeln!(
                w,
                "  {path}: {:.4}  ({} of {} matched)",
                verdict.score, verdict.matched_items, verdict.total_items
            )?;
        }
    }
    if let Some(similarity) = result.text_similarity {
        writeln!(w, "text:       {similarity:.4}")?;
    }
    Ok(())
}

/// Writes the score record as a single pretty-printed JSON object.
fn print_json<W: std::io::Write>(w: &mut W, result: &DocumentScore) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(result)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    writeln!(w, "{json}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
