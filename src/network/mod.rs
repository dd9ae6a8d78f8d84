//! Named networks and their endpoints.
//!
//! # Responsibilities
//! - Map well-known networks to API endpoints and network ids
//! - Produce the endpoint list the RPC client connects to
//! - Parse network names from config and CLI arguments

use serde::{Deserialize, Serialize};

/// Default API port exposed by a node.
pub const DEFAULT_API_PORT: u16 = 9650;

/// Default staking/peering port exposed by a node.
pub const DEFAULT_STAKING_PORT: u16 = 9651;

/// A network the SDK can target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Network {
    /// Production network.
    Mainnet,
    /// Public test network.
    Testnet,
    /// Custom deployment with its own API endpoint and network id.
    Devnet { api_url: String, network_id: u32 },
    /// Single node running on localhost.
    Local,
}

impl Network {
    /// Primary API endpoint URL for this network.
    pub fn api_url(&self) -> String {
        match self {
            Network::Mainnet => "https://api.subnetkit.network".to_string(),
            Network::Testnet => "https://api.test.subnetkit.network".to_string(),
            Network::Devnet { api_url, .. } => api_url.clone(),
            Network::Local => format!("http://127.0.0.1:{}", DEFAULT_API_PORT),
        }
    }

    /// Numeric network id, used to guard against issuing a transaction
    /// built for one network against another.
    pub fn network_id(&self) -> u32 {
        match self {
            Network::Mainnet => 1,
            Network::Testnet => 5,
            Network::Devnet { network_id, .. } => *network_id,
            Network::Local => 1337,
        }
    }

    /// Human-readable name used in logs and config files.
    pub fn name(&self) -> &str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Devnet { .. } => "devnet",
            Network::Local => "local",
        }
    }

    /// Parse a network name as it appears in config files and CLI flags.
    ///
    /// `devnet` cannot be parsed from a bare name since it needs an
    /// endpoint; build it from config instead.
    pub fn from_name(name: &str) -> Option<Network> {
        match name {
            "mainnet" => Some(Network::Mainnet),
            "testnet" => Some(Network::Testnet),
            "local" => Some(Network::Local),
            _ => None,
        }
    }

    /// Connection settings for this network with default timeouts.
    pub fn connection(&self) -> NetworkConfig {
        NetworkConfig {
            endpoints: vec![self.api_url()],
            network_id: self.network_id(),
            rpc_timeout_secs: 10,
            poll_interval_ms: 2_000,
            acceptance_timeout_secs: 120,
        }
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Connection settings the RPC client is built from.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NetworkConfig {
    /// API endpoints, tried in order (primary + failovers).
    pub endpoints: Vec<String>,

    /// Numeric network id the endpoints are expected to serve.
    pub network_id: u32,

    /// Per-request timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Poll interval for transaction acceptance, in milliseconds.
    pub poll_interval_ms: u64,

    /// Maximum time to wait for a transaction to be accepted, in seconds.
    pub acceptance_timeout_secs: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Network::Local.connection()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(Network::from_name("mainnet"), Some(Network::Mainnet));
        assert_eq!(Network::from_name("testnet"), Some(Network::Testnet));
        assert_eq!(Network::from_name("local"), Some(Network::Local));
        assert_eq!(Network::from_name("devnet"), None);
        assert_eq!(Network::from_name("bogus"), None);
    }

    #[test]
    fn test_network_ids_distinct() {
        assert_ne!(Network::Mainnet.network_id(), Network::Testnet.network_id());
        assert_ne!(Network::Mainnet.network_id(), Network::Local.network_id());
    }

    #[test]
    fn test_devnet_endpoint() {
        let net = Network::Devnet {
            api_url: "http://10.0.0.5:9650".to_string(),
            network_id: 42,
        };
        assert_eq!(net.api_url(), "http://10.0.0.5:9650");
        assert_eq!(net.network_id(), 42);
        assert_eq!(net.name(), "devnet");
    }

    #[test]
    fn test_connection_defaults() {
        let conn = Network::Local.connection();
        assert_eq!(conn.endpoints.len(), 1);
        assert_eq!(conn.rpc_timeout_secs, 10);
    }
}
