//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;

use serde_json::{json, Value};
use subnetkit::network::NetworkConfig;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Start a mock node speaking just enough HTTP + JSON-RPC for the client.
///
/// The responder maps (method, params) to a JSON-RPC result, or to an
/// error object as (code, message). Returns the bound address.
pub async fn start_mock_node<F>(responder: F) -> SocketAddr
where
    F: Fn(&str, &Value) -> Result<Value, (i64, String)> + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let responder = Arc::new(responder);

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let responder = responder.clone();
            tokio::spawn(async move {
                let mut buf = Vec::new();
                let mut tmp = [0u8; 4096];

                let header_end = loop {
                    let n = socket.read(&mut tmp).await.unwrap_or(0);
                    if n == 0 {
                        return;
                    }
                    buf.extend_from_slice(&tmp[..n]);
                    if let Some(pos) = find_subslice(&buf, b"\r\n\r\n") {
                        break pos + 4;
                    }
                };

                let headers = String::from_utf8_lossy(&buf[..header_end]).to_string();
                let content_length = headers
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        if name.eq_ignore_ascii_case("content-length") {
                            value.trim().parse::<usize>().ok()
                        } else {
                            None
                        }
                    })
                    .unwrap_or(0);

                while buf.len() < header_end + content_length {
                    let n = socket.read(&mut tmp).await.unwrap_or(0);
                    if n == 0 {
                        break;
                    }
                    buf.extend_from_slice(&tmp[..n]);
                }

                let request: Value =
                    serde_json::from_slice(&buf[header_end..header_end + content_length])
                        .unwrap_or_else(|_| json!({}));
                let method = request["method"].as_str().unwrap_or("").to_string();
                let id = request["id"].clone();

                let body = match responder(&method, &request["params"]) {
                    Ok(result) => json!({"jsonrpc": "2.0", "id": id, "result": result}),
                    Err((code, message)) => json!({
                        "jsonrpc": "2.0",
                        "id": id,
                        "error": {"code": code, "message": message},
                    }),
                }
                .to_string();

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

    addr
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Connection settings pointing at the given endpoints, tuned for tests.
pub fn test_connection(endpoints: Vec<String>) -> NetworkConfig {
    NetworkConfig {
        endpoints,
        network_id: 1337,
        rpc_timeout_secs: 2,
        poll_interval_ms: 50,
        acceptance_timeout_secs: 3,
    }
}
