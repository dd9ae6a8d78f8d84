//! RPC wire types and error definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tx::TxId;

/// Errors that can occur during RPC operations.
#[derive(Debug, Error)]
pub enum RpcError {
    /// Endpoint URL could not be parsed.
    #[error("invalid endpoint URL '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },

    /// Transport-level failure (connect, send, receive).
    #[error("transport error: {0}")]
    Transport(String),

    /// Every configured endpoint failed.
    #[error("all RPC endpoints failed for {method}")]
    AllEndpointsFailed { method: String },

    /// The node returned a JSON-RPC error object.
    #[error("API error {code}: {message}")]
    Api { code: i64, message: String },

    /// The node's response did not match the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The transaction was dropped by the node.
    #[error("transaction dropped: {0}")]
    TxDropped(String),

    /// The transaction was not accepted within the configured window.
    #[error("transaction not accepted after {0} seconds")]
    AcceptanceTimeout(u64),

    /// Connected node serves a different network than configured.
    #[error("network id mismatch: expected {expected}, got {actual}")]
    NetworkMismatch { expected: u32, actual: u32 },
}

/// Result type for RPC operations.
pub type RpcResult<T> = Result<T, RpcError>;

/// On-chain status of an issued transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainTxStatus {
    /// Accepted into the chain.
    Accepted,
    /// Seen by the node, not yet decided.
    Processing,
    /// Rejected; the node supplies a reason.
    Dropped(String),
    /// The node has no record of the transaction.
    Unknown,
}

/// A node identifier, e.g. `NodeID-7Xhw2mDxuDS44j42TCB6U5579esbSt3Lg`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NodeId(String);

impl NodeId {
    const PREFIX: &'static str = "NodeID-";

    /// Parse and validate a node id string.
    ///
    /// The payload after the `NodeID-` prefix must be non-empty base58
    /// (the alphabet excludes `0`, `O`, `I`, and `l`).
    pub fn parse(s: &str) -> Result<Self, String> {
        let payload = s
            .strip_prefix(Self::PREFIX)
            .ok_or_else(|| format!("node id must start with '{}': '{}'", Self::PREFIX, s))?;

        if payload.is_empty() {
            return Err(format!("node id payload is empty: '{}'", s));
        }
        if let Some(bad) = payload.chars().find(|c| !is_base58(*c)) {
            return Err(format!("node id contains invalid character '{}': '{}'", bad, s));
        }

        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_base58(c: char) -> bool {
    c.is_ascii_alphanumeric() && !matches!(c, '0' | 'O' | 'I' | 'l')
}

impl TryFrom<String> for NodeId {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        NodeId::parse(&s)
    }
}

impl From<NodeId> for String {
    fn from(id: NodeId) -> Self {
        id.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A subnet as reported by the node.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubnetInfo {
    /// Subnet id (the id of the transaction that created it).
    pub id: TxId,

    /// Addresses allowed to modify the subnet.
    pub control_keys: Vec<String>,

    /// Signatures required to modify the subnet.
    pub threshold: u32,
}

/// A validator as reported by the node.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatorInfo {
    /// Validating node.
    pub node_id: NodeId,

    /// Validator weight (stake amount for the primary network).
    pub weight: u64,

    /// Validation start, unix seconds.
    pub start_time: u64,

    /// Validation end, unix seconds.
    pub end_time: u64,
}

/// Minimum staking amounts enforced by the network.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StakeLimits {
    /// Minimum weight to validate.
    pub min_validator_stake: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_parse() {
        let id = NodeId::parse("NodeID-7Xhw2mDxuDS44j42TCB6U5579esbSt3Lg").unwrap();
        assert_eq!(id.as_str(), "NodeID-7Xhw2mDxuDS44j42TCB6U5579esbSt3Lg");
    }

    #[test]
    fn test_node_id_missing_prefix() {
        assert!(NodeId::parse("7Xhw2mDxuDS44j42TCB6U5579esbSt3Lg").is_err());
    }

    #[test]
    fn test_node_id_empty_payload() {
        assert!(NodeId::parse("NodeID-").is_err());
    }

    #[test]
    fn test_node_id_rejects_non_base58() {
        // '0', 'O', 'I', 'l' are outside the alphabet
        assert!(NodeId::parse("NodeID-abc0def").is_err());
        assert!(NodeId::parse("NodeID-abcOdef").is_err());
        assert!(NodeId::parse("NodeID-abc!def").is_err());
    }

    #[test]
    fn test_error_display() {
        let err = RpcError::AcceptanceTimeout(120);
        assert_eq!(err.to_string(), "transaction not accepted after 120 seconds");

        let err = RpcError::NetworkMismatch {
            expected: 1,
            actual: 5,
        };
        assert!(err.to_string().contains("expected 1"));
    }
}
