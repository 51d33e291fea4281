/// Extraction-schema model and array-path discovery.
///
/// Ground-truth datasets ship a JSON-schema-like description of the expected
/// output shape. The engine consults it for exactly one thing: which fields
/// are arrays, so their content can be scored order-independently instead of
/// by the structural differ. Everything else in the schema is carried but not
/// interpreted — this is deliberately not a validator.
use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::path::FieldPath;
use crate::value::JsonValue;

/// One node of an extraction schema.
///
/// Mirrors the subset of JSON Schema that extraction datasets actually use.
/// Only [`SchemaNode::schema_type`] and [`SchemaNode::properties`] drive the
/// array-path locator; `description`, `items`, and `required` are carried for
/// fidelity with on-disk schemas and for callers that render them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SchemaNode {
    /// The `type` tag (`"object"`, `"array"`, `"string"`, ...), if present.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,

    /// Human-readable field description, if present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Child schemas of an object node.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, SchemaNode>>,

    /// Element schema of an array node. Never descended by the locator:
    /// arrays are scored as whole values, not per element path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaNode>>,

    /// Names of required child fields, if present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
}

impl SchemaNode {
    /// Lenient, total conversion from any parsed JSON value.
    ///
    /// Anything that is not an object (or whose fields have unexpected
    /// types) degrades to an empty node rather than failing: a malformed
    /// schema simply yields no array paths.
    pub fn from_value(value: &JsonValue) -> Self {
        let Some(map) = value.as_object() else {
            return Self::default();
        };
        let schema_type = map.get("type").and_then(JsonValue::as_str).map(str::to_owned);
        let description = map
            .get("description")
            .and_then(JsonValue::as_str)
            .map(str::to_owned);
        let properties = map.get("properties").and_then(JsonValue::as_object).map(|props| {
            props
                .iter()
                .map(|(key, child)| (key.clone(), SchemaNode::from_value(child)))
                .collect()
        });
        let items = map.get("items").and_then(|v| {
            if v.as_object().is_some() {
                Some(Box::new(SchemaNode::from_value(v)))
            } else {
                None
            }
        });
        let required = map.get("required").and_then(JsonValue::as_array).map(|entries| {
            entries
                .iter()
                .filter_map(JsonValue::as_str)
                .map(str::to_owned)
                .collect()
        });
        Self {
            schema_type,
            description,
            properties,
            items,
            required,
        }
    }

    /// Returns `true` if this node's `type` tag is `"array"`.
    pub fn is_array(&self) -> bool {
        self.schema_type.as_deref() == Some("array")
    }
}

impl<'de> Deserialize<'de> for SchemaNode {
    /// Deserializes through [`SchemaNode::from_value`] so that malformed
    /// schema documents degrade instead of erroring.
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let value = JsonValue::deserialize(d)?;
        Ok(Self::from_value(&value))
    }
}

/// Collects the dotted paths of every array-typed field in the schema.
///
/// Walks `properties` depth-first, visiting keys in sorted order at each
/// level, so the result is deterministic. `items` is never entered. A
/// root-level array has no addressable path and is not recorded, and neither
/// is any field whose key contains a dot (such a key cannot be resolved by
/// dotted path).
pub fn find_array_paths(schema: &SchemaNode) -> Vec<FieldPath> {
    let mut paths = Vec::new();
    let mut stack = Vec::new();
    walk(schema, &mut stack, &mut paths);
    paths
}

fn walk(node: &SchemaNode, stack: &mut Vec<String>, out: &mut Vec<FieldPath>) {
    if node.is_array() && !stack.is_empty() {
        if let Ok(path) = FieldPath::from_segments(stack.iter().map(String::as_str)) {
            out.push(path);
        }
    }
    if let Some(properties) = &node.properties {
        for (key, child) in properties {
            stack.push(key.clone());
            walk(child, stack, out);
            stack.pop();
        }
    }
}
