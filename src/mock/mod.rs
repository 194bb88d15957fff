//! Mock backend server.
//!
//! Serves the login/profile round trip the client is exercised against,
//! plus endpoints that fail with structured and unstructured bodies.
//!
//! # Routes
//! - `POST /local/token`: login, `{email, password}`
//! - `GET /local/profile`: requires `Authorization: Bearer mocked_access_token`
//! - `POST /local/signup`: 400 with field errors on invalid input
//! - `GET /local/unavailable`: 503 with a plain-text body
//! - `GET /local/health`

pub mod routes;

use std::future::Future;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub use routes::{
    Profile, MOCK_ACCESS_TOKEN, MOCK_EMAIL, MOCK_PASSWORD, MOCK_REFRESH_TOKEN,
};

/// Build the mock router.
pub fn router() -> Router {
    Router::new()
        .route("/local/token", post(routes::token))
        .route("/local/profile", get(routes::profile))
        .route("/local/signup", post(routes::signup))
        .route("/local/unavailable", get(routes::unavailable))
        .route("/local/health", get(routes::health))
        .layer(TraceLayer::new_for_http())
}

/// Serve the mock API on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    tracing::info!(address = %addr, "Mock backend starting");

    axum::serve(listener, router())
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("Mock backend stopped");
    Ok(())
}
