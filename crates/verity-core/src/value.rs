/// Dynamic JSON value model shared by every scoring component.
///
/// Extraction providers return arbitrary JSON, so the engine works over a
/// closed tagged union rather than `serde_json::Value` directly: exhaustive
/// matches keep every traversal total, and the numeric variants carry enough
/// information to compare `1`, `1.0`, and large unsigned values the way a
/// grader would (providers do not distinguish integer from float spellings
/// of the same number).
use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A parsed JSON document or fragment.
///
/// Inputs are never mutated by the engine; every scoring call reads shared
/// references and allocates fresh output.
#[derive(Debug, Clone)]
pub enum JsonValue {
    /// JSON `null`.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Signed integer (fits in i64).
    Integer(i64),
    /// Unsigned integer above `i64::MAX`.
    UnsignedInteger(u64),
    /// IEEE 754 double-precision float.
    Float(f64),
    /// UTF-8 string.
    String(String),
    /// Ordered sequence of values.
    Array(Vec<JsonValue>),
    /// String-keyed map with deterministic (sorted) iteration order.
    Object(BTreeMap<String, JsonValue>),
}

/// A string-keyed map of values, the payload of [`JsonValue::Object`].
pub type JsonMap = BTreeMap<String, JsonValue>;

// 2^63 and 2^64 as exact f64 values, the open upper bounds for lossless
// float-to-integer comparison.
const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;
const TWO_POW_64: f64 = 18_446_744_073_709_551_616.0;

fn float_eq_i64(f: f64, i: i64) -> bool {
    f.is_finite() && f.fract() == 0.0 && (-TWO_POW_63..TWO_POW_63).contains(&f) && f as i64 == i
}

fn float_eq_u64(f: f64, u: u64) -> bool {
    f.is_finite() && f.fract() == 0.0 && (0.0..TWO_POW_64).contains(&f) && f as u64 == u
}

impl PartialEq for JsonValue {
    /// Equality as the differ sees it: numeric variants compare by value
    /// (`Integer(1)`, `UnsignedInteger(1)` and `Float(1.0)` are all equal),
    /// and float-to-float comparison uses bit patterns so results are
    /// reproducible even for NaN payloads.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::UnsignedInteger(a), Self::UnsignedInteger(b)) => a == b,
            (Self::Integer(a), Self::UnsignedInteger(b)) => {
                if *a >= 0 {
                    *a as u64 == *b
                } else {
                    false
                }
            }
            (Self::UnsignedInteger(a), Self::Integer(b)) => {
                if *b >= 0 {
                    *a == *b as u64
                } else {
                    false
                }
            }
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Integer(a), Self::Float(b)) | (Self::Float(b), Self::Integer(a)) => {
                float_eq_i64(*b, *a)
            }
            (Self::UnsignedInteger(a), Self::Float(b))
            | (Self::Float(b), Self::UnsignedInteger(a)) => float_eq_u64(*b, *a),
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl JsonValue {
    /// Returns the string value if this is a `JsonValue::String`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            Self::Null
            | Self::Bool(_)
            | Self::Integer(_)
            | Self::UnsignedInteger(_)
            | Self::Float(_)
            | Self::Array(_)
            | Self::Object(_) => None,
        }
    }

    /// Returns the bool value if this is a `JsonValue::Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Null
            | Self::Integer(_)
            | Self::UnsignedInteger(_)
            | Self::Float(_)
            | Self::String(_)
            | Self::Array(_)
            | Self::Object(_) => None,
        }
    }

    /// Returns the f64 value if this is any numeric variant.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Integer(n) => Some(*n as f64),
            Self::UnsignedInteger(n) => Some(*n as f64),
            Self::Null | Self::Bool(_) | Self::String(_) | Self::Array(_) | Self::Object(_) => None,
        }
    }

    /// Returns the inner map if this is a `JsonValue::Object`.
    pub fn as_object(&self) -> Option<&JsonMap> {
        match self {
            Self::Object(m) => Some(m),
            Self::Null
            | Self::Bool(_)
            | Self::Integer(_)
            | Self::UnsignedInteger(_)
            | Self::Float(_)
            | Self::String(_)
            | Self::Array(_) => None,
        }
    }

    /// Returns the inner array if this is a `JsonValue::Array`.
    pub fn as_array(&self) -> Option<&Vec<JsonValue>> {
        match self {
            Self::Array(a) => Some(a),
            Self::Null
            | Self::Bool(_)
            | Self::Integer(_)
            | Self::UnsignedInteger(_)
            | Self::Float(_)
            | Self::String(_)
            | Self::Object(_) => None,
        }
    }

    /// Returns `true` if this is `JsonValue::Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Short lowercase name of the variant, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Integer(_) | Self::UnsignedInteger(_) => "integer",
            Self::Float(_) => "number",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
        }
    }

    /// Index into an object by key.
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        match self {
            Self::Object(m) => m.get(key),
            Self::Null
            | Self::Bool(_)
            | Self::Integer(_)
            | Self::UnsignedInteger(_)
            | Self::Float(_)
            | Self::String(_)
            | Self::Array(_) => None,
        }
    }

    /// Resolve a dotted path (`"invoice.totals.net"`) through nested objects.
    ///
    /// Returns `None` as soon as a segment is missing or an intermediate
    /// value is not an object. Array indices are not supported; arrays are
    /// terminal values located by path, never traversed through.
    pub fn get_path(&self, path: &str) -> Option<&JsonValue> {
        let mut current = self;
        for segment in path.split('.') {
            current = current.get(segment)?;
        }
        Some(current)
    }

    /// Deterministic compact rendering used as the array matcher's
    /// comparison key and for displaying values to humans.
    ///
    /// A top-level string renders as its bare content (so trimming and
    /// case-folding apply to what the provider actually wrote); everything
    /// else renders as compact JSON with object keys in sorted order.
    /// Integral floats render without a fractional part, matching how the
    /// numeric equality in [`PartialEq`] unifies `1` and `1.0`.
    pub fn canonical_text(&self) -> String {
        match self {
            Self::String(s) => s.clone(),
            Self::Null
            | Self::Bool(_)
            | Self::Integer(_)
            | Self::UnsignedInteger(_)
            | Self::Float(_)
            | Self::Array(_)
            | Self::Object(_) => {
                let mut out = String::new();
                self.render(&mut out);
                out
            }
        }
    }

    fn render(&self, out: &mut String) {
        match self {
            Self::Null => out.push_str("null"),
            Self::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            Self::Integer(i) => out.push_str(&i.to_string()),
            Self::UnsignedInteger(u) => out.push_str(&u.to_string()),
            // f64 Display already drops the trailing ".0" of integral values.
            Self::Float(v) => out.push_str(&v.to_string()),
            Self::String(s) => push_json_string(s, out),
            Self::Array(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    item.render(out);
                }
                out.push(']');
            }
            Self::Object(map) => {
                out.push('{');
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    push_json_string(key, out);
                    out.push(':');
                    value.render(out);
                }
                out.push('}');
            }
        }
    }
}

/// Append `s` to `out` as a quoted JSON string literal.
fn push_json_string(s: &str, out: &mut String) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

impl From<serde_json::Value> for JsonValue {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Integer(i)
                } else if let Some(u) = n.as_u64() {
                    Self::UnsignedInteger(u)
                } else if let Some(f) = n.as_f64() {
                    Self::Float(f)
                } else {
                    Self::Null
                }
            }
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(a) => {
                Self::Array(a.into_iter().map(JsonValue::from).collect())
            }
            serde_json::Value::Object(m) => {
                Self::Object(m.into_iter().map(|(k, v)| (k, JsonValue::from(v))).collect())
            }
        }
    }
}

impl From<JsonValue> for serde_json::Value {
    fn from(v: JsonValue) -> Self {
        match v {
            JsonValue::Null => serde_json::Value::Null,
            JsonValue::Bool(b) => serde_json::Value::Bool(b),
            JsonValue::Integer(i) => serde_json::Value::Number(i.into()),
            JsonValue::UnsignedInteger(u) => serde_json::Value::Number(u.into()),
            JsonValue::Float(f) => serde_json::Number::from_f64(f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            JsonValue::String(s) => serde_json::Value::String(s),
            JsonValue::Array(a) => {
                serde_json::Value::Array(a.into_iter().map(serde_json::Value::from).collect())
            }
            JsonValue::Object(m) => {
                let map: serde_json::Map<String, serde_json::Value> = m
                    .into_iter()
                    .map(|(k, v)| (k, serde_json::Value::from(v)))
                    .collect();
                serde_json::Value::Object(map)
            }
        }
    }
}

impl Serialize for JsonValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_none(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Integer(i) => serializer.serialize_i64(*i),
            Self::UnsignedInteger(u) => serializer.serialize_u64(*u),
            Self::Float(f) => serializer.serialize_f64(*f),
            Self::String(s) => serializer.serialize_str(s),
            Self::Array(arr) => arr.serialize(serializer),
            Self::Object(map) => {
                let mut m = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map {
                    m.serialize_entry(k, v)?;
                }
                m.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for JsonValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(JsonValueVisitor)
    }
}

struct JsonValueVisitor;

impl<'de> Visitor<'de> for JsonValueVisitor {
    type Value = JsonValue;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("any valid JSON value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<JsonValue, E> {
        Ok(JsonValue::Bool(v))
    }

    fn visit_i8<E: de::Error>(self, v: i8) -> Result<JsonValue, E> {
        Ok(JsonValue::Integer(i64::from(v)))
    }

    fn visit_i16<E: de::Error>(self, v: i16) -> Result<JsonValue, E> {
        Ok(JsonValue::Integer(i64::from(v)))
    }

    fn visit_i32<E: de::Error>(self, v: i32) -> Result<JsonValue, E> {
        Ok(JsonValue::Integer(i64::from(v)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<JsonValue, E> {
        Ok(JsonValue::Integer(v))
    }

    fn visit_u8<E: de::Error>(self, v: u8) -> Result<JsonValue, E> {
        Ok(JsonValue::Integer(i64::from(v)))
    }

    fn visit_u16<E: de::Error>(self, v: u16) -> Result<JsonValue, E> {
        Ok(JsonValue::Integer(i64::from(v)))
    }

    fn visit_u32<E: de::Error>(self, v: u32) -> Result<JsonValue, E> {
        Ok(JsonValue::Integer(i64::from(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<JsonValue, E> {
        match i64::try_from(v) {
            Ok(i) => Ok(JsonValue::Integer(i)),
            Err(_) => Ok(JsonValue::UnsignedInteger(v)),
        }
    }

    fn visit_f32<E: de::Error>(self, v: f32) -> Result<JsonValue, E> {
        Ok(JsonValue::Float(f64::from(v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<JsonValue, E> {
        Ok(JsonValue::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<JsonValue, E> {
        Ok(JsonValue::String(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<JsonValue, E> {
        Ok(JsonValue::String(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<JsonValue, E> {
        Ok(JsonValue::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<JsonValue, E> {
        Ok(JsonValue::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<JsonValue, D::Error> {
        JsonValue::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<JsonValue, A::Error> {
        let mut arr = Vec::new();
        while let Some(elem) = seq.next_element()? {
            arr.push(elem);
        }
        Ok(JsonValue::Array(arr))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<JsonValue, A::Error> {
        let mut obj = BTreeMap::new();
        while let Some((key, value)) = map.next_entry::<String, JsonValue>()? {
            obj.insert(key, value);
        }
        Ok(JsonValue::Object(obj))
    }
}

impl fmt::Display for JsonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_text())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    fn parse(s: &str) -> JsonValue {
        serde_json::from_str(s).expect("parse test document")
    }

    #[test]
    fn document_round_trips_json() {
        let v = parse(r#"{"id": 7, "tags": ["a", "b"], "net": 10.5, "paid": null}"#);
        let json = serde_json::to_string(&v).expect("serialize");
        let back: JsonValue = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(v, back);
    }

    #[test]
    fn large_unsigned_round_trips_json() {
        let v = JsonValue::UnsignedInteger(u64::MAX);
        let json = serde_json::to_string(&v).expect("serialize");
        assert_eq!(json, u64::MAX.to_string());
        let back: JsonValue = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(v, back);
    }

    #[test]
    fn from_serde_json_value_and_back() {
        let original = serde_json::json!({"a": 1, "b": [true, "x"], "c": {"d": 2.5}});
        let v = JsonValue::from(original.clone());
        assert_eq!(serde_json::Value::from(v), original);
    }

    #[test]
    fn cross_integer_type_equality() {
        assert_eq!(JsonValue::Integer(42), JsonValue::UnsignedInteger(42));
        assert_eq!(JsonValue::UnsignedInteger(0), JsonValue::Integer(0));
        assert_ne!(JsonValue::Integer(-1), JsonValue::UnsignedInteger(u64::MAX));
    }

    #[test]
    fn integer_and_float_spellings_are_equal() {
        assert_eq!(JsonValue::Integer(1), JsonValue::Float(1.0));
        assert_eq!(JsonValue::Float(250.0), JsonValue::UnsignedInteger(250));
        assert_ne!(JsonValue::Integer(1), JsonValue::Float(1.5));
        assert_ne!(JsonValue::Integer(1), JsonValue::Float(f64::NAN));
    }

    #[test]
    fn huge_float_does_not_equal_saturated_integer() {
        assert_ne!(JsonValue::Float(TWO_POW_63), JsonValue::Integer(i64::MAX));
        assert_ne!(JsonValue::Float(TWO_POW_64), JsonValue::UnsignedInteger(u64::MAX));
    }

    #[test]
    fn nan_float_equality_uses_bits() {
        assert_eq!(JsonValue::Float(f64::NAN), JsonValue::Float(f64::NAN));
    }

    #[test]
    fn accessors_return_correct_values() {
        assert_eq!(JsonValue::String("x".to_owned()).as_str(), Some("x"));
        assert_eq!(JsonValue::Bool(false).as_bool(), Some(false));
        assert_eq!(JsonValue::Integer(7).as_f64(), Some(7.0));
        assert_eq!(JsonValue::Float(1.5).as_f64(), Some(1.5));
        assert!(JsonValue::Null.is_null());
        assert!(!JsonValue::Bool(true).is_null());
        assert!(JsonValue::Null.as_array().is_none());
        assert!(JsonValue::Array(vec![]).as_object().is_none());
    }

    #[test]
    fn get_on_object() {
        let v = parse(r#"{"k": true}"#);
        assert_eq!(v.get("k"), Some(&JsonValue::Bool(true)));
        assert_eq!(v.get("missing"), None);
        assert_eq!(JsonValue::Null.get("k"), None);
    }

    #[test]
    fn get_path_resolves_nested_objects() {
        let v = parse(r#"{"meta": {"tags": ["a"], "depth": {"n": 3}}}"#);
        assert_eq!(
            v.get_path("meta.depth.n"),
            Some(&JsonValue::Integer(3))
        );
        assert!(v.get_path("meta.tags").is_some());
        assert_eq!(v.get_path("meta.missing"), None);
        assert_eq!(v.get_path("meta.tags.0"), None);
    }

    #[test]
    fn canonical_text_renders_bare_top_level_strings() {
        assert_eq!(JsonValue::String("  Apple ".to_owned()).canonical_text(), "  Apple ");
        assert_eq!(JsonValue::Null.canonical_text(), "null");
        assert_eq!(JsonValue::Bool(true).canonical_text(), "true");
        assert_eq!(JsonValue::Integer(-5).canonical_text(), "-5");
    }

    #[test]
    fn canonical_text_unifies_integral_floats() {
        assert_eq!(JsonValue::Float(1.0).canonical_text(), "1");
        assert_eq!(JsonValue::Float(1.5).canonical_text(), "1.5");
        assert_eq!(JsonValue::Integer(1).canonical_text(), "1");
    }

    #[test]
    fn canonical_text_renders_containers_as_compact_json() {
        let v = parse(r#"{"b": "two", "a": [1, null]}"#);
        assert_eq!(v.canonical_text(), r#"{"a":[1,null],"b":"two"}"#);
    }

    #[test]
    fn canonical_text_escapes_nested_strings() {
        let v = parse(r#"["line\nbreak", "quote\"end"]"#);
        assert_eq!(v.canonical_text(), r#"["line\nbreak","quote\"end"]"#);
    }

    #[test]
    fn display_matches_canonical_text() {
        let v = parse(r#"{"a": 1}"#);
        assert_eq!(v.to_string(), v.canonical_text());
    }
}
