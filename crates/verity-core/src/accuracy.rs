/// Structural accuracy scoring over the diff tree.
///
/// The score is the share of ground-truth fields the prediction got right:
/// `max(0, 1 - changes / total_fields)`, where changes counts every added,
/// deleted, and modified field found by the differ and the denominator comes
/// from [`count_fields`] on the ground truth. Array content never influences
/// this score; array fields participate only as single slots.
use serde::Serialize;

use crate::diff::{DiffNode, diff};
use crate::fields::count_fields;
use crate::value::JsonValue;

/// Counts of structural changes, flattened from a diff tree.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DiffStats {
    /// Fields present in the prediction only.
    pub additions: usize,
    /// Fields present in the ground truth only.
    pub deletions: usize,
    /// Fields present on both sides with differing values.
    pub modifications: usize,
    /// Always `additions + deletions + modifications`.
    pub total: usize,
}

/// Accounting policy for a ground-truth array answered by an explicit `null`.
///
/// The differ always renders such a key as modified; the policy decides how
/// the accountant charges it. The policy never changes the diff view, only
/// the stats and the denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NullArrayPolicy {
    /// The key keeps its single denominator slot and the `null` costs one
    /// modification. This is what the plain differ reports.
    #[default]
    FieldModified,
    /// Net-neutral: the key is removed from the denominator and no change is
    /// charged, leaving the array entirely to the array matcher.
    Neutral,
    /// The key's slot widens to the ground-truth array's length and all of it
    /// is charged as deletions, so nulling a long array costs more than
    /// nulling a short one.
    PenalizeItems,
}

/// The complete structural accuracy verdict for one document pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccuracyResult {
    /// `max(0, 1 - stats.total / total_fields)`, rounded to 4 decimal
    /// digits; 1.0 when `total_fields` is zero.
    pub score: f64,
    /// Sparse diff: only differing keys.
    pub diff: DiffNode,
    /// Full diff: every key annotated, for inspection only.
    pub full_diff: DiffNode,
    /// Flattened change counts.
    pub stats: DiffStats,
    /// Scoreable fields in the ground truth, after policy adjustment.
    pub total_fields: usize,
}

/// Rounds to 4 decimal digits for stable, comparable report output.
pub(crate) fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Flattens a diff tree into change counts. Unchanged nodes (including the
/// excluded array-vs-array pairs) contribute nothing.
fn tally(node: &DiffNode, stats: &mut DiffStats) {
    match node {
        DiffNode::Unchanged(_) => {}
        DiffNode::Added(_) => stats.additions += 1,
        DiffNode::Deleted(_) => stats.deletions += 1,
        DiffNode::Modified { .. } => stats.modifications += 1,
        DiffNode::Nested(children) => {
            for child in children.values() {
                tally(child, stats);
            }
        }
    }
}

/// Collects the lengths of ground-truth arrays that the prediction answered
/// with an explicit `null`, walking matched object pairs in parallel.
fn null_array_lengths(actual: &JsonValue, predicted: &JsonValue, out: &mut Vec<usize>) {
    if let (JsonValue::Object(a), JsonValue::Object(b)) = (actual, predicted) {
        for (key, actual_child) in a {
            match (actual_child, b.get(key)) {
                (JsonValue::Array(items), Some(JsonValue::Null)) => out.push(items.len()),
                (JsonValue::Object(_), Some(predicted_child @ JsonValue::Object(_))) => {
                    null_array_lengths(actual_child, predicted_child, out);
                }
                _ => {}
            }
        }
    }
}

/// Scores a prediction against ground truth with the default
/// [`NullArrayPolicy::FieldModified`] accounting.
pub fn score(actual: &JsonValue, predicted: &JsonValue) -> AccuracyResult {
    score_with(actual, predicted, NullArrayPolicy::default())
}

/// Scores a prediction against ground truth under an explicit null-array
/// accounting policy.
pub fn score_with(
    actual: &JsonValue,
    predicted: &JsonValue,
    policy: NullArrayPolicy,
) -> AccuracyResult {
    let full_diff = diff(actual, predicted);
    let mut stats = DiffStats::default();
    tally(&full_diff, &mut stats);
    let mut total_fields = count_fields(actual);

    match policy {
        NullArrayPolicy::FieldModified => {}
        NullArrayPolicy::Neutral | NullArrayPolicy::PenalizeItems => {
            let mut lengths = Vec::new();
            null_array_lengths(actual, predicted, &mut lengths);
            for len in lengths {
                // Each collected key contributed one slot and one
                // modification; reverse that before applying the policy.
                stats.modifications -= 1;
                total_fields -= 1;
                if policy == NullArrayPolicy::PenalizeItems {
                    stats.deletions += len;
                    total_fields += len;
                }
            }
        }
    }

    if total_fields == 0 {
        return AccuracyResult {
            score: 1.0,
            diff: DiffNode::Nested(std::collections::BTreeMap::new()),
            full_diff: DiffNode::Nested(std::collections::BTreeMap::new()),
            stats: DiffStats::default(),
            total_fields: 0,
        };
    }

    stats.total = stats.additions + stats.deletions + stats.modifications;
    let raw = 1.0 - stats.total as f64 / total_fields as f64;
    AccuracyResult {
        score: round4(raw.max(0.0)),
        diff: full_diff.abbreviated(),
        full_diff,
        stats,
        total_fields,
    }
}
