//! Structured vs unstructured failure classification.
//!
//! The detail-key test is the only duck-typed check in the crate and lives
//! here on its own.

use serde_json::Value;

use crate::gateway::RawError;
use crate::normalizer::flatten::{flatten, GENERIC_ERROR_MESSAGE};
use crate::normalizer::node::ErrorNode;

/// Key whose presence marks a backend-reported error body.
pub const DETAIL_KEY: &str = "detail";

/// A failure, classified for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorInfo {
    /// Backend-reported, field-addressable error body.
    Structured { payload: ErrorNode },
    /// Network, server or unknown fault.
    Unstructured { message: Option<String> },
}

impl ErrorInfo {
    /// Messages to show the user. Always at least one.
    pub fn messages(&self) -> Vec<String> {
        match self {
            ErrorInfo::Structured { payload } => flatten(payload),
            ErrorInfo::Unstructured { .. } => vec![display_message(self)],
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, ErrorInfo::Structured { .. })
    }
}

/// True when `payload` is an object carrying the detail key.
pub fn is_backend_error(payload: Option<&Value>) -> bool {
    payload
        .and_then(Value::as_object)
        .is_some_and(|body| body.contains_key(DETAIL_KEY))
}

/// Classify a raw gateway failure. Status codes are not consulted.
pub fn classify(raw: &RawError) -> ErrorInfo {
    match raw.payload() {
        Some(body) if is_backend_error(Some(body)) => ErrorInfo::Structured {
            payload: ErrorNode::from_json(body),
        },
        _ => ErrorInfo::Unstructured {
            message: Some(raw.message().to_string()),
        },
    }
}

/// Single display string for an unstructured failure.
///
/// Structured errors yield their first flattened message.
pub fn display_message(info: &ErrorInfo) -> String {
    match info {
        ErrorInfo::Unstructured { message } => message
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(GENERIC_ERROR_MESSAGE)
            .to_string(),
        ErrorInfo::Structured { payload } => flatten(payload)
            .into_iter()
            .next()
            .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string()),
    }
}
