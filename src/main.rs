//! Mock API backend.
//!
//! Serves the login/profile endpoints the gateway client is exercised
//! against. Configuration comes from an optional TOML file given as the
//! first argument; `RUST_LOG` overrides the configured log filter.

use std::path::PathBuf;

use api_gateway_client::config;
use api_gateway_client::lifecycle::{signals, Shutdown};
use api_gateway_client::mock;
use api_gateway_client::observability;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = config::load_or_default(config_path.as_deref())?;

    observability::init_tracing(&config.observability.log_filter);

    tracing::info!(
        bind_address = %config.mock.bind_address,
        config_file = ?config_path,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.mock.bind_address).await?;

    let shutdown = Shutdown::new();
    tokio::spawn(signals::shutdown_on_signal(shutdown.clone()));

    mock::serve(listener, shutdown.signalled()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
