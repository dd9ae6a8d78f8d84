//! JSON-RPC client with endpoint failover, timeouts, and error handling.
//!
//! # Responsibilities
//! - POST JSON-RPC 2.0 requests to the node API
//! - Fail over across configured endpoints on transport errors
//! - Handle timeouts and surface API errors distinctly
//! - Provide a health check for node connectivity

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::time::timeout;
use url::Url;
use uuid::Uuid;

use crate::network::NetworkConfig;
use crate::observability::metrics;
use crate::rpc::types::{RpcError, RpcResult};

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: Uuid,
    method: &'a str,
    params: Value,
}

#[derive(Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorObject>,
}

#[derive(Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// Node RPC client wrapper with failover support.
#[derive(Clone)]
pub struct RpcClient {
    /// List of endpoint base URLs (primary + failovers).
    endpoints: Vec<Url>,
    /// Shared HTTP client.
    http: reqwest::Client,
    /// Connection settings.
    config: NetworkConfig,
    /// Request timeout duration.
    timeout_duration: Duration,
}

impl RpcClient {
    /// Create a new RPC client from connection settings.
    ///
    /// At least one endpoint must parse; invalid failover endpoints are
    /// logged and skipped.
    pub fn new(config: NetworkConfig) -> RpcResult<Self> {
        let timeout_duration = Duration::from_secs(config.rpc_timeout_secs);
        let mut endpoints = Vec::new();

        let mut iter = config.endpoints.iter();
        let primary = iter.next().ok_or_else(|| RpcError::InvalidEndpoint {
            url: String::new(),
            reason: "no endpoints configured".to_string(),
        })?;
        endpoints.push(primary.parse::<Url>().map_err(|e| RpcError::InvalidEndpoint {
            url: primary.clone(),
            reason: e.to_string(),
        })?);

        for url_str in iter {
            if let Ok(url) = url_str.parse() {
                endpoints.push(url);
            } else {
                tracing::warn!(url = %url_str, "Ignoring invalid failover endpoint");
            }
        }

        let http = reqwest::Client::builder()
            .timeout(timeout_duration)
            .build()
            .map_err(|e| RpcError::Transport(e.to_string()))?;

        tracing::info!(
            primary = %endpoints[0],
            failovers = endpoints.len() - 1,
            network_id = config.network_id,
            "RPC client initialized"
        );

        Ok(Self {
            endpoints,
            http,
            config,
            timeout_duration,
        })
    }

    /// Convenience constructor for a named network's default endpoints.
    pub fn for_network(network: &crate::network::Network) -> RpcResult<Self> {
        Self::new(network.connection())
    }

    /// Issue a JSON-RPC call against the given API path (e.g. "ext/platform").
    ///
    /// Endpoints are tried in order. Transport failures and timeouts fall
    /// through to the next endpoint; a JSON-RPC error object is returned
    /// immediately since retrying it elsewhere gives the same answer.
    pub async fn call<T: DeserializeOwned>(
        &self,
        path: &str,
        method: &str,
        params: Value,
    ) -> RpcResult<T> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: Uuid::new_v4(),
            method,
            params,
        };

        for (i, endpoint) in self.endpoints.iter().enumerate() {
            let url = match endpoint.join(path) {
                Ok(url) => url,
                Err(e) => {
                    tracing::warn!(endpoint_idx = i, error = %e, "Endpoint cannot serve path");
                    continue;
                }
            };

            let fut = self.http.post(url).json(&request).send();
            let response = match timeout(self.timeout_duration, fut).await {
                Ok(Ok(response)) => response,
                Ok(Err(e)) => {
                    tracing::warn!(endpoint_idx = i, method, error = %e, "RPC transport error, trying next endpoint");
                    metrics::record_rpc_call(method, false);
                    continue;
                }
                Err(_) => {
                    tracing::warn!(endpoint_idx = i, method, "RPC timeout, trying next endpoint");
                    metrics::record_rpc_call(method, false);
                    continue;
                }
            };

            let body: RpcResponse<T> = match response.json().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!(endpoint_idx = i, method, error = %e, "Malformed RPC response");
                    metrics::record_rpc_call(method, false);
                    continue;
                }
            };

            if let Some(err) = body.error {
                metrics::record_rpc_call(method, false);
                return Err(RpcError::Api {
                    code: err.code,
                    message: err.message,
                });
            }

            return match body.result {
                Some(result) => {
                    metrics::record_rpc_call(method, true);
                    Ok(result)
                }
                None => Err(RpcError::InvalidResponse(format!(
                    "{}: neither result nor error present",
                    method
                ))),
            };
        }

        Err(RpcError::AllEndpointsFailed {
            method: method.to_string(),
        })
    }

    /// Check that the connected node serves the configured network.
    pub async fn verify_network_id(&self) -> RpcResult<()> {
        let actual = self.network_id().await?;
        if actual != self.config.network_id {
            return Err(RpcError::NetworkMismatch {
                expected: self.config.network_id,
                actual,
            });
        }
        Ok(())
    }

    /// Check if the node is reachable and answering.
    ///
    /// Returns true if we can query the network id.
    pub async fn is_healthy(&self) -> bool {
        let healthy = self.network_id().await.is_ok();
        metrics::record_endpoint_health(self.endpoints[0].as_str(), healthy);
        healthy
    }

    /// Connection settings this client was built from.
    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// Poll interval used when waiting on transaction acceptance.
    pub(crate) fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.config.poll_interval_ms)
    }
}

impl std::fmt::Debug for RpcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcClient")
            .field("primary", &self.endpoints[0].as_str())
            .field("endpoints", &self.endpoints.len())
            .field("timeout_secs", &self.config.rpc_timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(endpoints: Vec<String>) -> NetworkConfig {
        NetworkConfig {
            endpoints,
            network_id: 1337,
            rpc_timeout_secs: 2,
            poll_interval_ms: 100,
            acceptance_timeout_secs: 5,
        }
    }

    #[test]
    fn test_no_endpoints_rejected() {
        let result = RpcClient::new(test_config(Vec::new()));
        assert!(matches!(result, Err(RpcError::InvalidEndpoint { .. })));
    }

    #[test]
    fn test_invalid_primary_rejected() {
        let result = RpcClient::new(test_config(vec!["not a url".to_string()]));
        assert!(matches!(result, Err(RpcError::InvalidEndpoint { .. })));
    }

    #[test]
    fn test_invalid_failover_skipped() {
        let client = RpcClient::new(test_config(vec![
            "http://127.0.0.1:9650".to_string(),
            "not a url".to_string(),
        ]))
        .unwrap();
        assert_eq!(client.endpoints.len(), 1);
    }

    #[tokio::test]
    async fn test_all_endpoints_failed() {
        // Nothing is listening on these ports
        let client = RpcClient::new(test_config(vec![
            "http://127.0.0.1:59991".to_string(),
            "http://127.0.0.1:59992".to_string(),
        ]))
        .unwrap();

        let result: RpcResult<serde_json::Value> = client
            .call("ext/info", "info.getNetworkID", serde_json::json!({}))
            .await;
        assert!(matches!(result, Err(RpcError::AllEndpointsFailed { .. })));
    }
}
