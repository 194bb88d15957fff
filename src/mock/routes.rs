//! Mock endpoint handlers.

use axum::{
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::auth::{ApiEnvelope, TokenPair};

pub const MOCK_EMAIL: &str = "test@example.com";
pub const MOCK_PASSWORD: &str = "test123";
pub const MOCK_ACCESS_TOKEN: &str = "mocked_access_token";
pub const MOCK_REFRESH_TOKEN: &str = "mocked_refresh_token";

const CITY_MAX_LEN: usize = 20;
const PASSWORD_MIN_LEN: usize = 8;

/// Profile returned to an authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub email: String,
}

/// `POST /local/token`
pub async fn token(Json(body): Json<Value>) -> Json<ApiEnvelope<TokenPair>> {
    let email = body.get("email").and_then(Value::as_str);
    let password = body.get("password").and_then(Value::as_str);

    if email == Some(MOCK_EMAIL) && password == Some(MOCK_PASSWORD) {
        tracing::debug!("Mock login accepted");
        return Json(ApiEnvelope::ok(
            TokenPair {
                access: MOCK_ACCESS_TOKEN.to_string(),
                refresh: MOCK_REFRESH_TOKEN.to_string(),
            },
            "Login successful",
        ));
    }

    tracing::debug!(email = ?email, "Mock login rejected");
    Json(ApiEnvelope::rejected(
        json!(["Invalid credentials"]),
        "Login failed",
    ))
}

/// `GET /local/profile`
pub async fn profile(headers: HeaderMap) -> Json<ApiEnvelope<Profile>> {
    let expected = format!("Bearer {MOCK_ACCESS_TOKEN}");
    let authorized = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == expected);

    if !authorized {
        return Json(ApiEnvelope::rejected(
            json!(["Unauthorized"]),
            "Invalid or missing token",
        ));
    }

    Json(ApiEnvelope::ok(
        Profile {
            name: "Mock User".to_string(),
            email: MOCK_EMAIL.to_string(),
        },
        "Profile fetched",
    ))
}

/// `POST /local/signup`
///
/// Answers 400 with a detail-bearing, field-addressed body when the input is
/// invalid.
pub async fn signup(Json(body): Json<Value>) -> Response {
    let errors = validate_signup(&body);
    if errors.is_empty() {
        return (
            StatusCode::CREATED,
            Json(json!({"success": true, "message": "Account created"})),
        )
            .into_response();
    }

    let mut payload = Map::new();
    payload.insert("detail".into(), json!("Validation failed"));
    payload.extend(errors);
    (StatusCode::BAD_REQUEST, Json(Value::Object(payload))).into_response()
}

/// `GET /local/unavailable`: a fault with no structured body.
pub async fn unavailable() -> (StatusCode, &'static str) {
    (StatusCode::SERVICE_UNAVAILABLE, "upstream database offline")
}

/// `GET /local/health`
pub async fn health() -> &'static str {
    "ok"
}

fn validate_signup(body: &Value) -> Map<String, Value> {
    let mut errors = Map::new();
    let email = body.get("email").and_then(Value::as_str).unwrap_or("");
    let password = body.get("password").and_then(Value::as_str).unwrap_or("");

    if email.trim().is_empty() {
        errors.insert("email".into(), json!(["This field is required."]));
    }

    let mut password_errors = Vec::new();
    if password.is_empty() {
        password_errors.push("This field is required.".to_string());
    } else if password.chars().count() < PASSWORD_MIN_LEN {
        password_errors.push(format!(
            "Ensure this field has at least {PASSWORD_MIN_LEN} characters."
        ));
    }
    if !password_errors.is_empty() {
        errors.insert("password".into(), json!(password_errors));
    }

    let city = body
        .pointer("/address/city")
        .and_then(Value::as_str)
        .unwrap_or("");
    if city.chars().count() > CITY_MAX_LEN {
        errors.insert(
            "address".into(),
            json!({"city": [format!("Ensure this field has no more than {CITY_MAX_LEN} characters.")]}),
        );
    }

    if !email.is_empty() && email == password {
        errors.insert(
            "non_field_errors".into(),
            json!(["The password is too similar to the email."]),
        );
    }

    errors
}
