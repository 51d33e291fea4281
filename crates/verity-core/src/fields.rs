/// Scoreable-field counting, the denominator of the structural accuracy score.
use crate::value::JsonValue;

/// Counts the scoreable leaf fields of a document.
///
/// Walking an object: a key holding a nested object is a container and
/// contributes its children's count, not itself; every other key — scalar,
/// null, or array-valued — contributes exactly one. Arrays are never
/// descended into (their content is the array matcher's job), but the
/// array-valued key still occupies one slot. A bare scalar, null, or array
/// at the top level counts zero.
///
/// Always computed from the ground-truth document, never the prediction.
pub fn count_fields(value: &JsonValue) -> usize {
    match value {
        JsonValue::Object(map) => map
            .values()
            .map(|child| match child {
                JsonValue::Object(_) => count_fields(child),
                JsonValue::Null
                | JsonValue::Bool(_)
                | JsonValue::Integer(_)
                | JsonValue::UnsignedInteger(_)
                | JsonValue::Float(_)
                | JsonValue::String(_)
                | JsonValue::Array(_) => 1,
            })
            .sum(),
        JsonValue::Null
        | JsonValue::Bool(_)
        | JsonValue::Integer(_)
        | JsonValue::UnsignedInteger(_)
        | JsonValue::Float(_)
        | JsonValue::String(_)
        | JsonValue::Array(_) => 0,
    }
}
