/// Structural diff engine for extraction documents.
///
/// Compares a ground-truth document against a prediction key by key and
/// classifies every field as unchanged, added, deleted, or modified. Arrays
/// are deliberately out of scope here: an array-vs-array pair is recorded as
/// unchanged and scored separately by the array matcher, so reordered array
/// content never shows up as a structural change.
///
/// The comparator never fails: type mismatches at a key (object vs scalar,
/// array vs null) are reported as [`DiffNode::Modified`] rather than errors.
use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::value::JsonValue;

/// Comparison result for one field (or for the whole document at the root).
///
/// Serializes to the annotated-object convention used in persisted reports:
/// added keys render as `key__added`, deleted keys as `key__deleted`, and a
/// modified field renders its key with an `{"__old": ..., "__new": ...}`
/// value. Unchanged fields render their plain value, which makes the full
/// tree readable as the ground truth with changes spliced in.
#[derive(Debug, Clone, PartialEq)]
pub enum DiffNode {
    /// Value present and equal on both sides. Only the full view keeps these;
    /// [`DiffNode::abbreviated`] prunes them.
    Unchanged(JsonValue),
    /// Key present in the prediction only.
    Added(JsonValue),
    /// Key present in the ground truth only.
    Deleted(JsonValue),
    /// Key present on both sides with differing values.
    Modified {
        /// Ground-truth value.
        old: JsonValue,
        /// Predicted value.
        new: JsonValue,
    },
    /// Both sides are objects; children compared key by key.
    Nested(BTreeMap<String, DiffNode>),
}

impl DiffNode {
    /// Returns `true` if no addition, deletion, or modification exists
    /// anywhere in the tree.
    pub fn is_clean(&self) -> bool {
        match self {
            Self::Unchanged(_) => true,
            Self::Added(_) | Self::Deleted(_) | Self::Modified { .. } => false,
            Self::Nested(children) => children.values().all(DiffNode::is_clean),
        }
    }

    /// The sparse view: unchanged fields and emptied subtrees are pruned so
    /// only differing keys remain. Two identical documents abbreviate to an
    /// empty object.
    pub fn abbreviated(&self) -> DiffNode {
        match self {
            Self::Unchanged(_) => Self::Nested(BTreeMap::new()),
            Self::Added(value) => Self::Added(value.clone()),
            Self::Deleted(value) => Self::Deleted(value.clone()),
            Self::Modified { old, new } => Self::Modified {
                old: old.clone(),
                new: new.clone(),
            },
            Self::Nested(children) => {
                let mut kept = BTreeMap::new();
                for (key, child) in children {
                    match child.abbreviated() {
                        Self::Unchanged(_) => {}
                        Self::Nested(grandchildren) => {
                            if !grandchildren.is_empty() {
                                kept.insert(key.clone(), Self::Nested(grandchildren));
                            }
                        }
                        pruned @ (Self::Added(_) | Self::Deleted(_) | Self::Modified { .. }) => {
                            kept.insert(key.clone(), pruned);
                        }
                    }
                }
                Self::Nested(kept)
            }
        }
    }
}

/// Compares ground truth against a prediction and returns the full diff tree
/// (every key annotated, including unchanged ones).
///
/// Classification at each key:
/// - key in prediction only → [`DiffNode::Added`];
/// - key in ground truth only → [`DiffNode::Deleted`];
/// - objects on both sides → recurse into [`DiffNode::Nested`];
/// - arrays on both sides → [`DiffNode::Unchanged`] (array content is the
///   array matcher's job);
/// - anything else → equality decides [`DiffNode::Unchanged`] versus
///   [`DiffNode::Modified`], so an object or array on exactly one side
///   degrades to a single modification at that key.
///
/// Top-level non-object inputs degrade the same way.
pub fn diff(actual: &JsonValue, predicted: &JsonValue) -> DiffNode {
    match (actual, predicted) {
        (JsonValue::Object(a), JsonValue::Object(b)) => {
            let mut children = BTreeMap::new();
            for (key, actual_child) in a {
                let node = match b.get(key) {
                    Some(predicted_child) => diff(actual_child, predicted_child),
                    None => DiffNode::Deleted(actual_child.clone()),
                };
                children.insert(key.clone(), node);
            }
            for (key, predicted_child) in b {
                if !a.contains_key(key) {
                    children.insert(key.clone(), DiffNode::Added(predicted_child.clone()));
                }
            }
            DiffNode::Nested(children)
        }
        (JsonValue::Array(_), JsonValue::Array(_)) => DiffNode::Unchanged(actual.clone()),
        _ => {
            if actual == predicted {
                DiffNode::Unchanged(actual.clone())
            } else {
                DiffNode::Modified {
                    old: actual.clone(),
                    new: predicted.clone(),
                }
            }
        }
    }
}

impl Serialize for DiffNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Unchanged(value) | Self::Added(value) | Self::Deleted(value) => {
                value.serialize(serializer)
            }
            Self::Modified { old, new } => {
                let mut m = serializer.serialize_map(Some(2))?;
                m.serialize_entry("__old", old)?;
                m.serialize_entry("__new", new)?;
                m.end()
            }
            Self::Nested(children) => {
                let mut m = serializer.serialize_map(Some(children.len()))?;
                for (key, child) in children {
                    match child {
                        Self::Added(value) => {
                            m.serialize_entry(&format!("{key}__added"), value)?;
                        }
                        Self::Deleted(value) => {
                            m.serialize_entry(&format!("{key}__deleted"), value)?;
                        }
                        Self::Unchanged(_) | Self::Modified { .. } | Self::Nested(_) => {
                            m.serialize_entry(key, child)?;
                        }
                    }
                }
                m.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    fn parse(s: &str) -> JsonValue {
        serde_json::from_str(s).expect("parse test document")
    }

    fn diff_of(actual: &str, predicted: &str) -> DiffNode {
        diff(&parse(actual), &parse(predicted))
    }

    fn rendered(node: &DiffNode) -> serde_json::Value {
        serde_json::to_value(node).expect("serialize diff node")
    }

    #[test]
    fn identical_documents_are_clean() {
        let d = diff_of(r#"{"a": 1, "b": {"c": 2}}"#, r#"{"a": 1, "b": {"c": 2}}"#);
        assert!(d.is_clean());
        assert_eq!(rendered(&d.abbreviated()), serde_json::json!({}));
    }

    #[test]
    fn modified_scalar_is_reported() {
        let d = diff_of(r#"{"a": 1, "b": 2}"#, r#"{"a": 1, "b": 3}"#);
        assert!(!d.is_clean());
        assert_eq!(
            rendered(&d.abbreviated()),
            serde_json::json!({"b": {"__old": 2, "__new": 3}})
        );
    }

    #[test]
    fn integer_and_float_spellings_do_not_differ() {
        let d = diff_of(r#"{"net": 10}"#, r#"{"net": 10.0}"#);
        assert!(d.is_clean());
    }

    #[test]
    fn missing_key_is_deleted_and_extra_key_is_added() {
        let d = diff_of(r#"{"a": 1, "b": 2}"#, r#"{"b": 2, "c": 3}"#);
        assert_eq!(
            rendered(&d.abbreviated()),
            serde_json::json!({"a__deleted": 1, "c__added": 3})
        );
    }

    #[test]
    fn nested_objects_recurse() {
        let d = diff_of(
            r#"{"a": 1, "b": {"c": 2, "d": 4, "e": 4}}"#,
            r#"{"a": 1, "b": {"c": 2, "d": 4, "e": 5}}"#,
        );
        assert_eq!(
            rendered(&d.abbreviated()),
            serde_json::json!({"b": {"e": {"__old": 4, "__new": 5}}})
        );
    }

    #[test]
    fn full_view_keeps_unchanged_keys() {
        let d = diff_of(r#"{"a": 1, "b": 2}"#, r#"{"a": 1, "b": 3}"#);
        assert_eq!(
            rendered(&d),
            serde_json::json!({"a": 1, "b": {"__old": 2, "__new": 3}})
        );
    }

    #[test]
    fn array_pairs_are_excluded() {
        let d = diff_of(r#"{"tags": ["a", "b"]}"#, r#"{"tags": ["b", "a", "c"]}"#);
        assert!(d.is_clean());
        assert_eq!(rendered(&d.abbreviated()), serde_json::json!({}));
        // The full view shows the ground-truth array untouched.
        assert_eq!(rendered(&d), serde_json::json!({"tags": ["a", "b"]}));
    }

    #[test]
    fn array_against_null_is_modified() {
        let d = diff_of(r#"{"tags": ["a"]}"#, r#"{"tags": null}"#);
        assert_eq!(
            rendered(&d.abbreviated()),
            serde_json::json!({"tags": {"__old": ["a"], "__new": null}})
        );
    }

    #[test]
    fn object_against_scalar_degrades_to_one_modification() {
        let d = diff_of(r#"{"b": {"c": 2, "d": 4}}"#, r#"{"b": 7}"#);
        assert_eq!(
            rendered(&d.abbreviated()),
            serde_json::json!({"b": {"__old": {"c": 2, "d": 4}, "__new": 7}})
        );
    }

    #[test]
    fn type_mismatch_never_panics() {
        let d = diff_of(r#"{"a": "one"}"#, r#"{"a": 1}"#);
        assert!(!d.is_clean());
    }

    #[test]
    fn top_level_scalars_degrade() {
        assert!(diff_of("42", "42").is_clean());
        let d = diff_of("42", r#""42""#);
        assert_eq!(
            rendered(&d),
            serde_json::json!({"__old": 42, "__new": "42"})
        );
    }

    #[test]
    fn empty_objects_compare_clean() {
        let d = diff_of("{}", "{}");
        assert!(d.is_clean());
        assert_eq!(rendered(&d.abbreviated()), serde_json::json!({}));
    }

    #[test]
    fn abbreviated_prunes_clean_subtrees() {
        let d = diff_of(
            r#"{"keep": {"x": 1}, "change": {"y": 2}}"#,
            r#"{"keep": {"x": 1}, "change": {"y": 9}}"#,
        );
        assert_eq!(
            rendered(&d.abbreviated()),
            serde_json::json!({"change": {"y": {"__old": 2, "__new": 9}}})
        );
    }
}
