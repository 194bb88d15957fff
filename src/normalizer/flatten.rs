//! Depth-first flattening of field → message(s) mappings.

use serde_json::Value;

use crate::normalizer::node::{ErrorNode, NON_FIELD_ERRORS};

/// Message used whenever nothing more specific can be shown.
pub const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Flatten a payload into display strings, in encounter order.
///
/// Never returns an empty list.
pub fn flatten(node: &ErrorNode) -> Vec<String> {
    let mut messages = Vec::new();
    match node {
        ErrorNode::Nested(entries) => walk(entries, "", &mut messages),
        ErrorNode::Leaf(message) => messages.push(message.clone()),
        ErrorNode::LeafList(list) => messages.extend(list.iter().cloned()),
        ErrorNode::Unrecognized => {}
    }

    if messages.is_empty() {
        messages.push(GENERIC_ERROR_MESSAGE.to_string());
    }
    messages
}

fn walk(entries: &[(String, ErrorNode)], prefix: &str, out: &mut Vec<String>) {
    for (key, value) in entries {
        match value {
            ErrorNode::LeafList(list) => {
                for message in list {
                    out.push(attribute(prefix, key, message));
                }
            }
            ErrorNode::Leaf(message) => out.push(attribute(prefix, key, message)),
            ErrorNode::Nested(children) => {
                let nested_prefix = format!("{prefix}{key}.");
                walk(children, &nested_prefix, out);
            }
            ErrorNode::Unrecognized => {
                tracing::trace!(field = %key, "Skipping unrecognized error value");
            }
        }
    }
}

fn attribute(prefix: &str, key: &str, message: &str) -> String {
    if key == NON_FIELD_ERRORS {
        format!("{prefix}{message}")
    } else {
        format!("{prefix}{key}: {message}")
    }
}

/// Format any JSON error value for display.
///
/// Strings pass through, objects are flattened, everything else falls back
/// to the generic message.
pub fn format_error(value: &Value) -> Vec<String> {
    match value {
        Value::String(message) => vec![message.clone()],
        Value::Object(_) => flatten(&ErrorNode::from_json(value)),
        _ => vec![GENERIC_ERROR_MESSAGE.to_string()],
    }
}
