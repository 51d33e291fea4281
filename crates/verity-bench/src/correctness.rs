//! Post-operation invariant checkers for scoring results.
//!
//! Each checker recomputes what a result claims from its own parts and
//! reports the first violation it finds. They run over generated data in
//! the integration tests, where inputs are too large to assert exact
//! values by hand.

use verity_core::{AccuracyResult, ArrayAccuracyResult, DiffNode, DocumentScore};

/// Invariants every accuracy result satisfies, under any null-array policy:
/// the score is a 4-digit value in `[0, 1]` consistent with the change and
/// field counts.
pub fn check_score_bounds(result: &AccuracyResult) -> Result<(), String> {
    if !(0.0..=1.0).contains(&result.score) {
        return Err(format!("score {} out of [0, 1]", result.score));
    }
    let scaled = result.score * 10_000.0;
    if (scaled - scaled.round()).abs() > 1e-6 {
        return Err(format!("score {} not rounded to 4 digits", result.score));
    }
    let stats = &result.stats;
    if stats.total != stats.additions + stats.deletions + stats.modifications {
        return Err(format!(
            "stats total {} != {} + {} + {}",
            stats.total, stats.additions, stats.deletions, stats.modifications
        ));
    }
    let expected = if result.total_fields == 0 {
        1.0
    } else {
        let raw = 1.0 - stats.total as f64 / result.total_fields as f64;
        (raw.max(0.0) * 10_000.0).round() / 10_000.0
    };
    if result.score != expected {
        return Err(format!(
            "score {} != {} recomputed from {} changes over {} fields",
            result.score, expected, stats.total, result.total_fields
        ));
    }
    Ok(())
}

/// Checks that the reported stats are exactly the marker tally of the full
/// diff and that the sparse diff is its abbreviation. Valid under the
/// default field-modified accounting; the other null-array policies adjust
/// stats away from the raw tally.
pub fn check_diff_accounting(result: &AccuracyResult) -> Result<(), String> {
    let (additions, deletions, modifications) = recount(&result.full_diff);
    if (additions, deletions, modifications)
        != (
            result.stats.additions,
            result.stats.deletions,
            result.stats.modifications,
        )
    {
        return Err(format!(
            "diff tally ({additions}, {deletions}, {modifications}) != stats ({}, {}, {})",
            result.stats.additions, result.stats.deletions, result.stats.modifications
        ));
    }
    if result.diff != result.full_diff.abbreviated() {
        return Err("sparse diff is not the abbreviation of the full diff".to_owned());
    }
    Ok(())
}

fn recount(node: &DiffNode) -> (usize, usize, usize) {
    match node {
        DiffNode::Unchanged(_) => (0, 0, 0),
        DiffNode::Added(_) => (1, 0, 0),
        DiffNode::Deleted(_) => (0, 1, 0),
        DiffNode::Modified { .. } => (0, 0, 1),
        DiffNode::Nested(children) => children.values().fold((0, 0, 0), |acc, child| {
            let (a, d, m) = recount(child);
            (acc.0 + a, acc.1 + d, acc.2 + m)
        }),
    }
}

/// Invariants of one array-match result: counts bounded by the larger side
/// and a score that is the rounded match ratio.
pub fn check_array_result(result: &ArrayAccuracyResult) -> Result<(), String> {
    if result.matched_items > result.total_items {
        return Err(format!(
            "matched {} exceeds total {}",
            result.matched_items, result.total_items
        ));
    }
    if result.missing_items.len() > result.total_items {
        return Err(format!(
            "{} missing items exceed total {}",
            result.missing_items.len(),
            result.total_items
        ));
    }
    if result.extra_items.len() > result.total_items {
        return Err(format!(
            "{} extra items exceed total {}",
            result.extra_items.len(),
            result.total_items
        ));
    }
    let expected = if result.total_items == 0 {
        1.0
    } else {
        (result.matched_items as f64 / result.total_items as f64 * 10_000.0).round() / 10_000.0
    };
    if result.score != expected {
        return Err(format!(
            "array score {} != {} recomputed from {}/{}",
            result.score, expected, result.matched_items, result.total_items
        ));
    }
    Ok(())
}

/// Runs the per-part checkers over a full document score.
pub fn check_document_score(score: &DocumentScore) -> Result<(), String> {
    check_score_bounds(&score.json)?;
    for (path, result) in &score.arrays {
        check_array_result(result).map_err(|e| format!("{path}: {e}"))?;
    }
    if let Some(similarity) = score.text_similarity {
        if !(0.0..=1.0).contains(&similarity) {
            return Err(format!("text similarity {similarity} out of [0, 1]"));
        }
    }
    Ok(())
}
