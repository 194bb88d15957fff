//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the base URL is an absolute http(s) URL
//! - Validate value ranges (timeouts > 0, bind address parses)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ClientConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::ClientConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("api.base_url '{0}' is not a valid URL")]
    InvalidBaseUrl(String),

    #[error("api.base_url must use http or https, got '{0}'")]
    UnsupportedScheme(String),

    #[error("api.timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("mock.bind_address '{0}' is not a socket address")]
    InvalidBindAddress(String),

    #[error("notifications.error_title must not be empty")]
    EmptyErrorTitle,
}

/// Validate a parsed configuration, collecting every error.
pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match Url::parse(&config.api.base_url) {
        Ok(url) if url.scheme() != "http" && url.scheme() != "https" => {
            errors.push(ValidationError::UnsupportedScheme(url.scheme().to_string()));
        }
        Ok(_) => {}
        Err(_) => errors.push(ValidationError::InvalidBaseUrl(config.api.base_url.clone())),
    }

    if config.api.timeout_secs == Some(0) {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.mock.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.mock.bind_address.clone(),
        ));
    }

    if config.notifications.error_title.trim().is_empty() {
        errors.push(ValidationError::EmptyErrorTitle);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ClientConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = ClientConfig::default();
        config.api.base_url = "ftp://files.example.com".into();
        config.api.timeout_secs = Some(0);
        config.mock.bind_address = "nowhere".into();
        config.notifications.error_title = "  ".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::UnsupportedScheme("ftp".into()),
                ValidationError::ZeroTimeout,
                ValidationError::InvalidBindAddress("nowhere".into()),
                ValidationError::EmptyErrorTitle,
            ]
        );
    }

    #[test]
    fn test_relative_base_url_rejected() {
        let mut config = ClientConfig::default();
        config.api.base_url = "/api".into();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::InvalidBaseUrl("/api".into())]);
    }
}
