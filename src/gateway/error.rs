//! Gateway error types.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Where a request failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RawErrorKind {
    /// The request could not be built (bad URL, bad header).
    InvalidRequest,
    /// Connection, TLS or I/O failure; no response was read.
    Network,
    /// The backend answered with a non-2xx status.
    Status,
    /// A 2xx response whose body did not decode.
    Decode,
}

impl RawErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RawErrorKind::InvalidRequest => "invalid_request",
            RawErrorKind::Network => "network",
            RawErrorKind::Status => "status",
            RawErrorKind::Decode => "decode",
        }
    }
}

/// The raw failure returned in a [`RequestResult`](super::RequestResult).
///
/// `payload` holds the response body when it parsed as JSON; it is what the
/// normalizer inspects.
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[error("{message}")]
pub struct RawError {
    kind: RawErrorKind,
    status: Option<u16>,
    message: String,
    payload: Option<Value>,
}

impl RawError {
    pub fn new(
        kind: RawErrorKind,
        status: Option<u16>,
        message: impl Into<String>,
        payload: Option<Value>,
    ) -> Self {
        Self {
            kind,
            status,
            message: message.into(),
            payload,
        }
    }

    pub fn kind(&self) -> RawErrorKind {
        self.kind
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn payload(&self) -> Option<&Value> {
        self.payload.as_ref()
    }
}

/// Failures constructing a [`Gateway`](super::Gateway).
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
