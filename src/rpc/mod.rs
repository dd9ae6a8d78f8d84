//! Node RPC subsystem.
//!
//! # Data Flow
//! ```text
//! NetworkConfig (endpoints, timeouts)
//!     → client.rs (JSON-RPC transport with failover + timeouts)
//!     → platform.rs (chain operations: issue tx, balances, subnets, validators)
//!     → info.rs (node identity, version, bootstrap state)
//! ```
//!
//! # Design Decisions
//! - Endpoints are tried in order; transport failures fall through to the
//!   next endpoint, API-level errors do not (they are deterministic)
//! - Every request carries a UUID id and a per-request timeout
//! - Graceful degradation when the node is unreachable

pub mod client;
pub mod info;
pub mod platform;
pub mod types;

pub use client::RpcClient;
pub use types::{ChainTxStatus, NodeId, RpcError, RpcResult, StakeLimits, SubnetInfo, ValidatorInfo};
