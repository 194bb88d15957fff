//! Request options, URL resolution and header merging.

use std::str::FromStr;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::Method;
use serde_json::Value;
use url::Url;

use crate::session::Credential;

pub const X_REQUEST_ID: &str = "x-request-id";

/// Per-call options. Defaults to a GET with no body and no extra headers.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    method: Method,
    body: Option<Value>,
    headers: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post(body: Value) -> Self {
        Self::default().with_method(Method::POST).json(body)
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// JSON request body.
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Add a caller header. Later values for the same name are appended.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }
}

/// Resolve `path` against `base`.
///
/// Absolute http(s) URLs pass through; anything else is appended to the base
/// with exactly one slash between them.
pub fn resolve_url(base: &Url, path: &str) -> Result<Url, url::ParseError> {
    if path.starts_with("http://") || path.starts_with("https://") {
        return Url::parse(path);
    }
    let joined = format!(
        "{}/{}",
        base.as_str().trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    Url::parse(&joined)
}

/// Build the outgoing header map.
///
/// Caller headers go in first. The bearer token is attached only when one is
/// present and the caller supplied no `Authorization` of their own. A request
/// ID is generated unless the caller set one.
pub fn merge_headers(
    caller: &[(String, String)],
    credential: Option<&Credential>,
) -> Result<HeaderMap, String> {
    let mut headers = HeaderMap::new();
    for (name, value) in caller {
        let header_name = HeaderName::from_str(name)
            .map_err(|e| format!("Invalid header name ({name}): {e}"))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|e| format!("Invalid header value for {name}: {e}"))?;
        headers.append(header_name, header_value);
    }

    if let Some(credential) = credential {
        if !headers.contains_key(AUTHORIZATION) {
            let mut value = HeaderValue::from_str(&credential.bearer())
                .map_err(|_| "Stored credential is not a valid header value".to_string())?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
    }

    if !headers.contains_key(X_REQUEST_ID) {
        let request_id = uuid::Uuid::new_v4().to_string();
        if let Ok(value) = HeaderValue::from_str(&request_id) {
            headers.insert(X_REQUEST_ID, value);
        }
    }

    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("http://api.test/v1/").unwrap()
    }

    #[test]
    fn test_resolve_relative_paths() {
        assert_eq!(
            resolve_url(&base(), "/local/token").unwrap().as_str(),
            "http://api.test/v1/local/token"
        );
        assert_eq!(
            resolve_url(&base(), "local/profile?x=1").unwrap().as_str(),
            "http://api.test/v1/local/profile?x=1"
        );
        let bare = Url::parse("http://api.test").unwrap();
        assert_eq!(
            resolve_url(&bare, "items").unwrap().as_str(),
            "http://api.test/items"
        );
    }

    #[test]
    fn test_resolve_absolute_url_passes_through() {
        assert_eq!(
            resolve_url(&base(), "https://other.test/x").unwrap().as_str(),
            "https://other.test/x"
        );
    }

    #[test]
    fn test_no_token_no_authorization() {
        let headers = merge_headers(&[("Accept".into(), "application/json".into())], None).unwrap();
        assert!(headers.get(AUTHORIZATION).is_none());
        assert_eq!(headers.get("accept").unwrap(), "application/json");
    }

    #[test]
    fn test_token_injected_as_bearer() {
        let token = Credential::new("T");
        let headers = merge_headers(&[], Some(&token)).unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer T");
    }

    #[test]
    fn test_caller_authorization_wins() {
        let token = Credential::new("T");
        let caller = vec![("authorization".to_string(), "Basic abc".to_string())];
        let headers = merge_headers(&caller, Some(&token)).unwrap();
        let values: Vec<_> = headers.get_all(AUTHORIZATION).iter().collect();
        assert_eq!(values, vec!["Basic abc"]);
    }

    #[test]
    fn test_request_id_generated_unless_supplied() {
        let generated = merge_headers(&[], None).unwrap();
        let id = generated.get(X_REQUEST_ID).unwrap().to_str().unwrap();
        assert!(uuid::Uuid::parse_str(id).is_ok());

        let caller = vec![("X-Request-ID".to_string(), "fixed".to_string())];
        let kept = merge_headers(&caller, None).unwrap();
        assert_eq!(kept.get(X_REQUEST_ID).unwrap(), "fixed");
    }

    #[test]
    fn test_invalid_caller_header_rejected() {
        let caller = vec![("Valid-Name".to_string(), "invalid\nvalue".to_string())];
        let err = merge_headers(&caller, None).unwrap_err();
        assert!(err.contains("Invalid header value"));
    }

    #[test]
    fn test_options_builder() {
        let options = RequestOptions::post(serde_json::json!({"a": 1})).header("X-Trace", "1");
        assert_eq!(options.method(), &Method::POST);
        assert_eq!(options.body().unwrap()["a"], 1);
        assert_eq!(options.headers().len(), 1);
        assert_eq!(RequestOptions::get().method(), &Method::GET);
    }
}
