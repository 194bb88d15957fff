//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use api_gateway_client::config::ClientConfig;
use api_gateway_client::lifecycle::Shutdown;
use api_gateway_client::mock;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Start the axum mock API. Trigger the returned handle to stop it.
#[allow(dead_code)]
pub async fn start_mock_api(addr: SocketAddr) -> Shutdown {
    let listener = TcpListener::bind(addr).await.unwrap();
    let shutdown = Shutdown::new();
    let signalled = shutdown.signalled();
    tokio::spawn(async move {
        let _ = mock::serve(listener, signalled).await;
    });
    tokio::time::sleep(Duration::from_millis(50)).await;
    shutdown
}

/// Start a raw backend answering every request with a fixed response.
///
/// Returns the request heads it has received, lowercased.
#[allow(dead_code)]
pub async fn start_recording_backend(
    addr: SocketAddr,
    status_line: &'static str,
    content_type: &'static str,
    body: &'static str,
) -> Arc<Mutex<Vec<String>>> {
    let listener = TcpListener::bind(addr).await.unwrap();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let recorder = seen.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let recorder = recorder.clone();
                    tokio::spawn(async move {
                        let head = read_head(&mut socket).await;
                        recorder.lock().unwrap().push(head.to_lowercase());

                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_line,
                            content_type,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    seen
}

/// Start a raw backend that echoes the bearer token back as `{"token": ...}`.
///
/// Requests carrying `slow_token` are answered after `delay`. Returns the
/// number of requests received so far.
#[allow(dead_code)]
pub async fn start_token_echo_backend(
    addr: SocketAddr,
    slow_token: &'static str,
    delay: Duration,
) -> Arc<Mutex<usize>> {
    let listener = TcpListener::bind(addr).await.unwrap();
    let received = Arc::new(Mutex::new(0usize));
    let counter = received.clone();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let counter = counter.clone();
            tokio::spawn(async move {
                let head = read_head(&mut socket).await;
                *counter.lock().unwrap() += 1;

                let token = head
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("authorization")
                            .then(|| value.trim().trim_start_matches("Bearer ").to_string())
                    })
                    .unwrap_or_default();
                if token == slow_token {
                    tokio::time::sleep(delay).await;
                }

                let body = format!(r#"{{"token":"{token}"}}"#);
                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    received
}

async fn read_head(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                buf.extend_from_slice(&chunk[..n]);
                if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// Client config pointing at `addr`, bypassing any system proxy.
pub fn client_config(addr: SocketAddr) -> ClientConfig {
    let mut config = ClientConfig::default();
    config.api.base_url = format!("http://{addr}");
    config.api.system_proxy = false;
    config
}
