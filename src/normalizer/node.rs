//! Recursive shape of a backend validation payload.

use serde_json::Value;

/// Field name reserved for messages not tied to a single input field.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// One value in a field → message(s) mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorNode {
    /// A single message.
    Leaf(String),
    /// Several messages for the same field.
    LeafList(Vec<String>),
    /// A nested mapping, entries in encounter order.
    Nested(Vec<(String, ErrorNode)>),
    /// Numbers, booleans, nulls. Skipped when flattening.
    Unrecognized,
}

impl ErrorNode {
    /// Build a node from JSON, keeping object key order.
    ///
    /// Arrays keep only their string elements; an array of objects or numbers
    /// becomes an empty list and contributes nothing.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::String(s) => ErrorNode::Leaf(s.clone()),
            Value::Array(items) => ErrorNode::LeafList(
                items
                    .iter()
                    .filter_map(|item| item.as_str().map(str::to_owned))
                    .collect(),
            ),
            Value::Object(map) => ErrorNode::Nested(
                map.iter()
                    .map(|(key, value)| (key.clone(), ErrorNode::from_json(value)))
                    .collect(),
            ),
            Value::Null | Value::Bool(_) | Value::Number(_) => ErrorNode::Unrecognized,
        }
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, ErrorNode::Nested(_))
    }
}

impl From<&Value> for ErrorNode {
    fn from(value: &Value) -> Self {
        ErrorNode::from_json(value)
    }
}
