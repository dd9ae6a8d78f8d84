//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the SDK.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::network::{Network, NetworkConfig, DEFAULT_API_PORT, DEFAULT_STAKING_PORT};

/// Root configuration for the SDK.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SdkConfig {
    /// Network selection and endpoints.
    pub network: NetworkSection,

    /// Staking bounds enforced before a validator transaction is built.
    pub staking: StakingConfig,

    /// Cloud provisioning settings.
    pub cloud: CloudConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl SdkConfig {
    /// Resolve the network section into the concrete network target.
    pub fn network(&self) -> Network {
        match Network::from_name(&self.network.name) {
            Some(net) => net,
            None => Network::Devnet {
                api_url: self.network.api_url.clone(),
                network_id: self.network.network_id,
            },
        }
    }

    /// Resolve connection settings, applying any endpoint overrides.
    pub fn connection(&self) -> NetworkConfig {
        let mut conn = self.network().connection();
        if !self.network.api_url.is_empty() {
            conn.endpoints = vec![self.network.api_url.clone()];
        }
        conn.endpoints.extend(self.network.failover_urls.iter().cloned());
        if self.network.rpc_timeout_secs > 0 {
            conn.rpc_timeout_secs = self.network.rpc_timeout_secs;
        }
        conn
    }
}

/// Network selection.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NetworkSection {
    /// Network name: "mainnet", "testnet", "local", or "devnet".
    pub name: String,

    /// API endpoint override. Required for devnet, optional otherwise.
    pub api_url: String,

    /// Failover API endpoints, tried in order after the primary.
    pub failover_urls: Vec<String>,

    /// Network id, only consulted for devnet.
    pub network_id: u32,

    /// Per-request RPC timeout in seconds (0 = network default).
    pub rpc_timeout_secs: u64,
}

impl Default for NetworkSection {
    fn default() -> Self {
        Self {
            name: "local".to_string(),
            api_url: String::new(),
            failover_urls: Vec::new(),
            network_id: 0,
            rpc_timeout_secs: 0,
        }
    }
}

/// Staking bounds for validator transactions.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StakingConfig {
    /// Minimum validator weight.
    pub min_weight: u64,

    /// Minimum validation period in seconds.
    pub min_duration_secs: u64,

    /// Maximum validation period in seconds.
    pub max_duration_secs: u64,
}

impl Default for StakingConfig {
    fn default() -> Self {
        Self {
            min_weight: 1,
            min_duration_secs: 24 * 60 * 60,
            max_duration_secs: 365 * 24 * 60 * 60,
        }
    }
}

/// Cloud provisioning settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CloudConfig {
    /// AWS region to provision in.
    pub region: String,

    /// EC2 instance type.
    pub instance_type: String,

    /// AMI id to launch.
    pub ami_id: String,

    /// EC2 key pair name for SSH access.
    pub key_pair_name: String,

    /// Security group name (created if missing).
    pub security_group: String,

    /// SSH login user on launched instances.
    pub ssh_user: String,

    /// Path to the private key matching `key_pair_name`.
    pub ssh_key_path: String,

    /// Number of nodes to launch.
    pub node_count: u32,

    /// Node API port opened in the security group.
    pub api_port: u16,

    /// Node staking port opened in the security group.
    pub staking_port: u16,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            region: "us-east-1".to_string(),
            instance_type: "c5.2xlarge".to_string(),
            ami_id: String::new(),
            key_pair_name: "subnetkit".to_string(),
            security_group: "subnetkit-node".to_string(),
            ssh_user: "ubuntu".to_string(),
            ssh_key_path: String::new(),
            node_count: 1,
            api_port: DEFAULT_API_PORT,
            staking_port: DEFAULT_STAKING_PORT,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_resolves_to_local() {
        let config = SdkConfig::default();
        assert_eq!(config.network(), Network::Local);
    }

    #[test]
    fn test_unknown_name_resolves_to_devnet() {
        let mut config = SdkConfig::default();
        config.network.name = "devnet".to_string();
        config.network.api_url = "http://10.0.0.5:9650".to_string();
        config.network.network_id = 42;
        match config.network() {
            Network::Devnet { api_url, network_id } => {
                assert_eq!(api_url, "http://10.0.0.5:9650");
                assert_eq!(network_id, 42);
            }
            other => panic!("expected devnet, got {}", other),
        }
    }

    #[test]
    fn test_connection_overrides() {
        let mut config = SdkConfig::default();
        config.network.api_url = "http://primary:9650".to_string();
        config.network.failover_urls = vec!["http://backup:9650".to_string()];
        config.network.rpc_timeout_secs = 3;

        let conn = config.connection();
        assert_eq!(conn.endpoints, vec!["http://primary:9650", "http://backup:9650"]);
        assert_eq!(conn.rpc_timeout_secs, 3);
    }

    #[test]
    fn test_staking_defaults_ordered() {
        let staking = StakingConfig::default();
        assert!(staking.min_duration_secs <= staking.max_duration_secs);
        assert!(staking.min_weight >= 1);
    }
}
