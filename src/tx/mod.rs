//! Transaction subsystem.
//!
//! # Data Flow
//! ```text
//! UnsignedTx (what to do)
//!     → multisig.rs (collect control-key signatures until quorum)
//!     → signed envelope (tx + signatures, hex-encoded)
//!     → rpc platform.issueTx → poll acceptance → Committed
//! ```
//!
//! # Design Decisions
//! - Lifecycle state is derived from the signature count, never stored
//!   separately, so it cannot drift
//! - Signatures are verified on insertion; a bad signature never enters
//!   the set
//! - The node-assigned transaction id is authoritative once committed

pub mod multisig;

use alloy::primitives::{keccak256, Address, Bytes, B256};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::keychain::KeyError;
use crate::rpc::types::{NodeId, RpcError};

pub use multisig::MultisigTx;

/// A transaction identifier (32 bytes, hex-displayed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxId(pub B256);

impl std::fmt::Display for TxId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TxId {
    type Err = alloy::hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(TxId(s.parse()?))
    }
}

/// Errors from building, signing, and committing transactions.
#[derive(Debug, Error)]
pub enum TxError {
    /// A subnet needs at least one control key.
    #[error("control key set is empty")]
    EmptyControlKeys,

    /// Threshold of zero would let anyone commit.
    #[error("threshold must be at least 1")]
    ZeroThreshold,

    /// More signatures required than keys exist.
    #[error("threshold {threshold} exceeds control key count {keys}")]
    ThresholdTooHigh { threshold: u32, keys: usize },

    /// The same control key listed twice.
    #[error("duplicate control key {0}")]
    DuplicateControlKey(Address),

    /// A signature was offered by an address outside the control set.
    #[error("{0} is not a control key of this transaction")]
    NotControlKey(Address),

    /// The keychain holds none of the control keys.
    #[error("keychain holds no control keys for this transaction")]
    NoMatchingKeys,

    /// A signature did not recover to the claimed signer.
    #[error("signature for {claimed} recovers to {recovered}")]
    SignatureMismatch { claimed: Address, recovered: Address },

    /// Commit attempted below quorum.
    #[error("not enough signatures to commit: have {have}, need {need}")]
    NotReady { have: u32, need: u32 },

    /// Commit attempted on an already-committed transaction.
    #[error("transaction already committed as {0}")]
    AlreadyCommitted(TxId),

    /// Signing failed.
    #[error(transparent)]
    Key(#[from] KeyError),

    /// Issuing or polling failed.
    #[error(transparent)]
    Rpc(#[from] RpcError),

    /// Canonical serialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result type for transaction operations.
pub type TxResult<T> = Result<T, TxError>;

/// Signature-collection state of a multisig transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxStatus {
    /// No signatures collected yet.
    Undefined,
    /// Some signatures collected, below the threshold.
    PartiallySigned,
    /// Quorum reached; the transaction can be committed.
    ReadyToCommit,
    /// Issued and accepted on-chain.
    Committed,
}

/// A transaction before any signatures are attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum UnsignedTx {
    /// Create a new subnet governed by `control_keys` with `threshold`
    /// signatures required for changes.
    CreateSubnet {
        control_keys: Vec<Address>,
        threshold: u32,
    },

    /// Create a blockchain inside an existing subnet.
    CreateBlockchain {
        subnet_id: TxId,
        vm_id: String,
        name: String,
        genesis: Bytes,
    },

    /// Add a validator to a subnet.
    AddValidator {
        subnet_id: TxId,
        node_id: NodeId,
        weight: u64,
        start_time: u64,
        end_time: u64,
    },

    /// Remove a validator from a subnet.
    RemoveValidator { subnet_id: TxId, node_id: NodeId },

    /// Move funds between addresses.
    Transfer { to: Address, amount: u64 },
}

impl UnsignedTx {
    /// Canonical byte encoding, the input to both hashing and signing.
    pub fn canonical_bytes(&self) -> TxResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| TxError::Serialization(e.to_string()))
    }

    /// Local transaction id: keccak256 of the canonical bytes.
    ///
    /// The node assigns the authoritative id on acceptance; this one is
    /// what control keys sign.
    pub fn tx_id(&self) -> TxResult<TxId> {
        Ok(TxId(keccak256(self.canonical_bytes()?)))
    }

    /// Short human-readable kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            UnsignedTx::CreateSubnet { .. } => "create_subnet",
            UnsignedTx::CreateBlockchain { .. } => "create_blockchain",
            UnsignedTx::AddValidator { .. } => "add_validator",
            UnsignedTx::RemoveValidator { .. } => "remove_validator",
            UnsignedTx::Transfer { .. } => "transfer",
        }
    }
}

/// Validate a control key set and threshold.
///
/// Shared by [`MultisigTx`] and the subnet helpers so a bad owner set is
/// rejected at the earliest point it appears.
pub fn validate_owners(control_keys: &[Address], threshold: u32) -> TxResult<()> {
    if control_keys.is_empty() {
        return Err(TxError::EmptyControlKeys);
    }
    if threshold == 0 {
        return Err(TxError::ZeroThreshold);
    }
    if threshold as usize > control_keys.len() {
        return Err(TxError::ThresholdTooHigh {
            threshold,
            keys: control_keys.len(),
        });
    }
    for (i, key) in control_keys.iter().enumerate() {
        if control_keys[..i].contains(key) {
            return Err(TxError::DuplicateControlKey(*key));
        }
    }
    Ok(())
}
