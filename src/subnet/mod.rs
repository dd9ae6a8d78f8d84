//! Subnet deployment and management subsystem.
//!
//! # Data Flow
//! ```text
//! Subnet descriptor (control keys, threshold)
//!     → deploy.rs (CreateSubnetTx → commit → subnet id;
//!                  CreateBlockchainTx for chains inside it)
//!     → validator.rs (AddValidator / RemoveValidator with staking checks)
//!     → tx multisig → rpc
//! ```
//!
//! # Design Decisions
//! - Every helper returns a MultisigTx so quorum collection stays in the
//!   caller's hands; `deploy` is the single-party convenience path
//! - Validator parameters are checked locally before a transaction is
//!   built, so quorum is never collected over a doomed transaction

pub mod deploy;
pub mod validator;

use thiserror::Error;

use crate::rpc::types::{NodeId, RpcError};
use crate::tx::TxError;

pub use deploy::Subnet;
pub use validator::ValidatorSpec;

/// Errors from subnet deployment and validator management.
#[derive(Debug, Error)]
pub enum SubnetError {
    /// Chain or validator operations need the subnet committed first.
    #[error("subnet is not committed on-chain yet")]
    NotCommitted,

    /// A blockchain needs a genesis.
    #[error("genesis data is empty")]
    EmptyGenesis,

    /// Chain names are printable ASCII, non-empty.
    #[error("invalid chain name: {0}")]
    InvalidChainName(String),

    /// Validator weight below the network or config minimum.
    #[error("weight {weight} below minimum {min}")]
    WeightBelowMinimum { weight: u64, min: u64 },

    /// Validation period outside the allowed bounds.
    #[error("validation period of {secs}s outside allowed range [{min}s, {max}s]")]
    DurationOutOfBounds { secs: u64, min: u64, max: u64 },

    /// Validation must start in the future.
    #[error("start time {start} is not in the future (now {now})")]
    StartTimeInPast { start: u64, now: u64 },

    /// End before start.
    #[error("end time {end} is not after start time {start}")]
    EndBeforeStart { start: u64, end: u64 },

    /// The node already validates this subnet.
    #[error("{0} is already a validator of this subnet")]
    DuplicateValidator(NodeId),

    /// Removal target is not in the validator set.
    #[error("{0} is not a validator of this subnet")]
    ValidatorNotFound(NodeId),

    /// Underlying transaction failure.
    #[error(transparent)]
    Tx(#[from] TxError),

    /// Underlying RPC failure.
    #[error(transparent)]
    Rpc(#[from] RpcError),
}

/// Result type for subnet operations.
pub type SubnetResult<T> = Result<T, SubnetError>;
