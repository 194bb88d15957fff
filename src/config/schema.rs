//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the client.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the API client and its mock backend.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ClientConfig {
    /// Outbound API settings (base URL, transport options).
    pub api: ApiConfig,

    /// Credential storage settings.
    pub session: SessionConfig,

    /// Failure notification settings.
    pub notifications: NotificationConfig,

    /// Mock backend settings.
    pub mock: MockConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Outbound API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL every relative request path is resolved against.
    pub base_url: String,

    /// Optional total request timeout in seconds.
    /// Unset means the transport default applies.
    pub timeout_secs: Option<u64>,

    /// User-Agent sent with every request.
    pub user_agent: String,

    /// Honour `HTTP_PROXY`/`HTTPS_PROXY` from the environment.
    pub system_proxy: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
            timeout_secs: None,
            user_agent: format!("api-gateway-client/{}", env!("CARGO_PKG_VERSION")),
            system_proxy: true,
        }
    }
}

/// Credential storage configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SessionConfig {
    /// File the CLI persists tokens to between invocations.
    pub token_file: Option<String>,
}

/// Failure notification configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Title attached to every failure notification.
    pub error_title: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            error_title: "Error".to_string(),
        }
    }
}

/// Mock backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MockConfig {
    /// Bind address (e.g., "127.0.0.1:3000").
    pub bind_address: String,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_filter: String,

    /// Record gateway metrics through the installed `metrics` recorder.
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_filter: "api_gateway_client=info,tower_http=info".to_string(),
            metrics_enabled: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: ClientConfig = toml::from_str("").unwrap();
        assert_eq!(config.api.base_url, "http://127.0.0.1:3000");
        assert!(config.api.timeout_secs.is_none());
        assert_eq!(config.notifications.error_title, "Error");
        assert!(config.session.token_file.is_none());
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: ClientConfig = toml::from_str(
            r#"
            [api]
            base_url = "https://api.example.com"
            timeout_secs = 15
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://api.example.com");
        assert_eq!(config.api.timeout_secs, Some(15));
        assert!(config.api.user_agent.starts_with("api-gateway-client/"));
        assert_eq!(config.mock.bind_address, "127.0.0.1:3000");
    }
}
