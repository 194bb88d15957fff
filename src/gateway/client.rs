//! Authenticated request gateway.
//!
//! # Responsibilities
//! - Resolve request paths against the configured base URL
//! - Attach the session's bearer token and a request ID
//! - Decode 2xx JSON bodies into the caller's type
//! - Classify failures, notify the sink, return `{data: None, error}`

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::config::ClientConfig;
use crate::gateway::error::{GatewayError, RawError, RawErrorKind};
use crate::gateway::reactive::FetchHandle;
use crate::gateway::request::{merge_headers, resolve_url, RequestOptions};
use crate::gateway::result::RequestResult;
use crate::normalizer;
use crate::notification::{self, Notification, NotificationSink};
use crate::observability::metrics;
use crate::session::CredentialStore;

/// Outbound API client. Cheap to clone; clones share the session and sink.
#[derive(Clone)]
pub struct Gateway {
    client: reqwest::Client,
    base_url: Url,
    credentials: Arc<dyn CredentialStore>,
    sink: Arc<dyn NotificationSink>,
    error_title: Arc<str>,
    metrics_enabled: bool,
}

impl Gateway {
    /// Create a gateway from configuration, an injected credential store and
    /// a notification sink.
    pub fn new(
        config: &ClientConfig,
        credentials: Arc<dyn CredentialStore>,
        sink: Arc<dyn NotificationSink>,
    ) -> Result<Self, GatewayError> {
        let base_url =
            Url::parse(&config.api.base_url).map_err(|source| GatewayError::InvalidBaseUrl {
                url: config.api.base_url.clone(),
                source,
            })?;

        let mut builder = reqwest::Client::builder().user_agent(config.api.user_agent.clone());
        if let Some(secs) = config.api.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if !config.api.system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;

        tracing::debug!(base_url = %base_url, timeout_secs = ?config.api.timeout_secs, "Gateway initialized");

        Ok(Self {
            client,
            base_url,
            credentials,
            sink,
            error_title: Arc::from(config.notifications.error_title.as_str()),
            metrics_enabled: config.observability.metrics_enabled,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.credentials
    }

    /// Perform one request. Never fails: errors come back in the result.
    pub async fn request<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> RequestResult<T> {
        let start = Instant::now();
        let method = options.method().to_string();

        match self.execute(path, &options).await {
            Ok(data) => {
                self.record(&method, "success", start);
                RequestResult::success(data)
            }
            Err(raw) => {
                self.report_failure(&raw);
                self.record(&method, raw.kind().as_str(), start);
                RequestResult::failure(raw)
            }
        }
    }

    /// Start a subscribable fetch. Must be called within a Tokio runtime.
    pub fn watch<T>(&self, path: &str, options: RequestOptions) -> FetchHandle<T>
    where
        T: DeserializeOwned + Send + Sync + 'static,
    {
        FetchHandle::spawn(self.clone(), path.to_string(), options)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        path: &str,
        options: &RequestOptions,
    ) -> Result<T, RawError> {
        let method = options.method().clone();

        let url = resolve_url(&self.base_url, path).map_err(|e| {
            RawError::new(
                RawErrorKind::InvalidRequest,
                None,
                format!("[{method}] \"{path}\": {e}"),
                None,
            )
        })?;

        // Snapshot: the token read here is the one used for this call.
        let credential = self.credentials.get();
        let headers = merge_headers(options.headers(), credential.as_ref()).map_err(|e| {
            RawError::new(
                RawErrorKind::InvalidRequest,
                None,
                format!("[{method}] \"{url}\": {e}"),
                None,
            )
        })?;

        tracing::debug!(
            method = %method,
            url = %url,
            authenticated = credential.is_some(),
            "Sending request"
        );

        let mut request = self
            .client
            .request(method.clone(), url.clone())
            .headers(headers);
        if let Some(body) = options.body() {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            RawError::new(
                RawErrorKind::Network,
                None,
                format!("[{method}] \"{url}\": {e}"),
                None,
            )
        })?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| {
            RawError::new(
                RawErrorKind::Network,
                Some(status.as_u16()),
                format!("[{method}] \"{url}\": {e}"),
                None,
            )
        })?;

        if !status.is_success() {
            let payload = serde_json::from_slice::<Value>(&bytes).ok();
            let reason = status.canonical_reason().unwrap_or_default();
            return Err(RawError::new(
                RawErrorKind::Status,
                Some(status.as_u16()),
                format!("[{method}] \"{url}\": {} {reason}", status.as_u16())
                    .trim_end()
                    .to_string(),
                payload,
            ));
        }

        decode_body(&bytes).map_err(|e| {
            RawError::new(
                RawErrorKind::Decode,
                Some(status.as_u16()),
                format!("[{method}] \"{url}\": invalid response body: {e}"),
                None,
            )
        })
    }

    /// Classify and hand display messages to the sink. Never panics.
    fn report_failure(&self, raw: &RawError) {
        let info = normalizer::classify(raw);
        tracing::warn!(
            kind = raw.kind().as_str(),
            status = ?raw.status(),
            structured = info.is_structured(),
            error = %raw,
            "Request failed"
        );
        for message in info.messages() {
            self.notify(Notification::error(self.error_title.as_ref(), message));
        }
    }

    /// Deliver a notification through this gateway's sink.
    pub fn notify(&self, notification: Notification) {
        notification::dispatch(self.sink.as_ref(), notification, self.metrics_enabled);
    }

    fn record(&self, method: &str, outcome: &'static str, start: Instant) {
        if self.metrics_enabled {
            metrics::record_request(method, outcome, start);
        }
    }
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

/// Empty bodies decode as JSON `null`.
fn decode_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, serde_json::Error> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        serde_json::from_value(Value::Null)
    } else {
        serde_json::from_slice(bytes)
    }
}
