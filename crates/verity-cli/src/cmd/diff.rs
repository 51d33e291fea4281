//! Implementation of `verity diff <truth> <prediction>`.
//!
//! Parses two JSON documents and writes the annotated structural diff to
//! stdout: changed scalars as `{"__old", "__new"}` pairs, removals as
//! `key__deleted`, additions as `key__added`. Array fields are handled by
//! the order-independent matcher, so they never appear as structural
//! changes here.
//!
//! Flags:
//! - `--full`: render the whole document with unchanged fields included.
//!
//! Exit codes:
//! - 0 = documents are equivalent
//! - 1 = differences found
//! - 2 = parse failure on either input
use verity_core::{DiffNode, DiffStats, JsonValue, score};

use crate::OutputFormat;
use crate::error::CliError;

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

/// Runs the `diff` command.
///
/// Parses `content_a` (ground truth) and `content_b` (prediction), renders
/// the annotated diff to stdout, and maps the outcome to the exit-code
/// contract: `Ok(())` when the documents are equivalent,
/// [`CliError::DiffHasDifferences`] otherwise.
///
/// # Errors
///
/// - [`CliError::ParseFailed`] — either input is not valid JSON.
/// - [`CliError::DiffHasDifferences`] — the diff is non-empty.
/// - [`CliError::IoError`] — stdout write failed.
pub fn run(
    content_a: &str,
    content_b: &str,
    full: bool,
    format: &OutputFormat,
) -> Result<(), CliError> {
    let actual: JsonValue = serde_json::from_str(content_a).map_err(|e| CliError::ParseFailed {
        source: "ground truth".to_owned(),
        detail: format!("line {}, column {}: {e}", e.line(), e.column()),
    })?;
    let predicted: JsonValue =
        serde_json::from_str(content_b).map_err(|e| CliError::ParseFailed {
            source: "prediction".to_owned(),
            detail: format!("line {}, column {}: {e}", e.line(), e.column()),
        })?;

    // The scorer already computes both diff views and the change tally.
    let result = score(&actual, &predicted);
    let node = if full { &result.full_diff } else { &result.diff };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Human => write_human(&mut out, node, &result.stats),
        OutputFormat::Json => write_json(&mut out, node, &result.stats),
    }
    .map_err(|e| CliError::IoError {
        source: "stdout".to_owned(),
        detail: e.to_string(),
    })?;

    if result.stats.total == 0 {
        Ok(())
    } else {
        Err(CliError::DiffHasDifferences)
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Writes the annotated diff followed by a one-line summary.
fn write_human<W: std::io::Write>(
    w: &mut W,
    node: &DiffNode,
    stats: &DiffStats,
) -> std::io::Result<()> {
    let rendered = serde_json::to_string_pretty(node)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    writeln!(w, "{rendered}")?;
    writeln!(
        w,
        "Summary: {} added, {} deleted, {} modified",
        stats.additions, stats.deletions, stats.modifications
    )
}

/// Writes the diff and tally as a single JSON object.
fn write_json<W: std::io::Write>(
    w: &mut W,
    node: &DiffNode,
    stats: &DiffStats,
) -> std::io::Result<()> {
    let record = serde_json::json!({
        "diff": node,
        "stats": stats,
    });
    let json = serde_json::to_string_pretty(&record)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    writeln!(w, "{json}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]
    #![allow(clippy::panic)]

    use super::*;

    const BASE: &str = r#"{"vendor": "ACME", "total": 42}"#;
    const MODIFIED: &str = r#"{"vendor": "ACME", "total": 41}"#;
    const REORDERED_ARRAYS: &str = r#"{"items": ["b", "a"]}"#;
    const ORIGINAL_ARRAYS: &str = r#"{"items": ["a", "b"]}"#;

    #[test]
    fn identical_documents_return_ok() {
        let result = run(BASE, BASE, false, &OutputFormat::Human);
        assert!(result.is_ok(), "expected Ok: {result:?}");
    }

    #[test]
    fn modified_documents_return_differences() {
        let result = run(BASE, MODIFIED, false, &OutputFormat::Human);
        match result {
            Err(CliError::DiffHasDifferences) => {}
            other => panic!("expected DiffHasDifferences, got {other:?}"),
        }
    }

    #[test]
    fn differences_exit_code_is_1() {
        let err = run(BASE, MODIFIED, false, &OutputFormat::Json).expect_err("should differ");
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn reordered_arrays_are_not_differences() {
        let result = run(ORIGINAL_ARRAYS, REORDERED_ARRAYS, false, &OutputFormat::Human);
        assert!(result.is_ok(), "array order is not structural: {result:?}");
    }

    #[test]
    fn full_flag_does_not_change_the_exit_contract() {
        assert!(run(BASE, BASE, true, &OutputFormat::Human).is_ok());
        assert!(run(BASE, MODIFIED, true, &OutputFormat::Human).is_err());
    }

    #[test]
    fn invalid_first_input_names_ground_truth() {
        let err = run("not json", BASE, false, &OutputFormat::Human).expect_err("should fail");
        match err {
            CliError::ParseFailed { source, .. } => assert_eq!(source, "ground truth"),
            other => panic!("expected ParseFailed, got {other:?}"),
        }
    }

    #[test]
    fn invalid_second_input_names_prediction() {
        let err = run(BASE, "not json", false, &OutputFormat::Human).expect_err("should fail");
        match err {
            CliError::ParseFailed { source, .. } => assert_eq!(source, "prediction"),
            other => panic!("expected ParseFailed, got {other:?}"),
        }
    }

    #[test]
    fn parse_failure_exit_code_is_2() {
        let err = run("{", "{", false, &OutputFormat::Human).expect_err("should fail");
        assert_eq!(err.exit_code(), 2);
    }
}
