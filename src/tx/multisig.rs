//! Multi-signature transaction lifecycle.
//!
//! # Responsibilities
//! - Collect control-key signatures over an unsigned transaction
//! - Derive lifecycle state from signatures present vs threshold required
//! - Commit at quorum: issue on-chain and wait for acceptance
//!
//! # Lifecycle
//! ```text
//! Undefined ──sign──▶ PartiallySigned ──sign──▶ ReadyToCommit ──commit──▶ Committed
//!     └──────────────────(threshold == 1: a single sign reaches quorum)──────┘
//! ```

use std::collections::BTreeMap;

use alloy::primitives::{Address, Signature};
use serde::{Deserialize, Serialize};

use crate::keychain::Keychain;
use crate::rpc::RpcClient;
use crate::tx::{validate_owners, TxError, TxId, TxResult, TxStatus, UnsignedTx};

/// One collected signature, as carried in the signed envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SignatureEntry {
    signer: Address,
    signature: String,
}

/// The envelope issued to the node: the transaction plus its quorum.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SignedEnvelope {
    tx: UnsignedTx,
    signatures: Vec<SignatureEntry>,
}

/// A transaction collecting control-key signatures toward a threshold.
#[derive(Debug, Clone)]
pub struct MultisigTx {
    unsigned: UnsignedTx,
    control_keys: Vec<Address>,
    threshold: u32,
    signatures: BTreeMap<Address, Signature>,
    committed: Option<TxId>,
}

impl MultisigTx {
    /// Create a multisig transaction governed by the given control keys.
    pub fn new(unsigned: UnsignedTx, control_keys: Vec<Address>, threshold: u32) -> TxResult<Self> {
        validate_owners(&control_keys, threshold)?;
        Ok(Self {
            unsigned,
            control_keys,
            threshold,
            signatures: BTreeMap::new(),
            committed: None,
        })
    }

    /// Create a single-signer transaction (e.g. a transfer).
    pub fn single(unsigned: UnsignedTx, signer: Address) -> Self {
        Self {
            unsigned,
            control_keys: vec![signer],
            threshold: 1,
            signatures: BTreeMap::new(),
            committed: None,
        }
    }

    /// Sign with every control key the keychain holds.
    ///
    /// Returns the number of signatures added. Re-signing with a key that
    /// already signed is a no-op; a keychain holding none of the control
    /// keys is an error so a caller cannot mistake "signed nothing" for
    /// progress.
    pub fn sign(&mut self, keychain: &Keychain) -> TxResult<usize> {
        if let Some(id) = self.committed {
            return Err(TxError::AlreadyCommitted(id));
        }

        if !self.control_keys.iter().any(|k| keychain.get(*k).is_some()) {
            return Err(TxError::NoMatchingKeys);
        }

        let hash = self.unsigned.tx_id()?.0;
        let mut added = 0;

        for control_key in &self.control_keys {
            if self.signatures.contains_key(control_key) {
                continue;
            }
            let Some(key) = keychain.get(*control_key) else {
                continue;
            };

            let signature = key.sign_hash(hash)?;
            let recovered = signature
                .recover_address_from_prehash(&hash)
                .map_err(|e| TxError::Serialization(e.to_string()))?;
            if recovered != *control_key {
                return Err(TxError::SignatureMismatch {
                    claimed: *control_key,
                    recovered,
                });
            }

            self.signatures.insert(*control_key, signature);
            added += 1;
        }

        tracing::debug!(
            kind = self.unsigned.kind(),
            added,
            have = self.signatures.len(),
            need = self.threshold,
            "Signatures collected"
        );
        Ok(added)
    }

    /// Attach a signature produced elsewhere (a remote co-signer).
    ///
    /// The signature must recover to `signer`, and `signer` must be a
    /// control key. Duplicate signatures are ignored.
    pub fn add_signature(&mut self, signer: Address, signature: Signature) -> TxResult<()> {
        if let Some(id) = self.committed {
            return Err(TxError::AlreadyCommitted(id));
        }
        if !self.control_keys.contains(&signer) {
            return Err(TxError::NotControlKey(signer));
        }

        let hash = self.unsigned.tx_id()?.0;
        let recovered = signature
            .recover_address_from_prehash(&hash)
            .map_err(|e| TxError::Serialization(e.to_string()))?;
        if recovered != signer {
            return Err(TxError::SignatureMismatch {
                claimed: signer,
                recovered,
            });
        }

        self.signatures.entry(signer).or_insert(signature);
        Ok(())
    }

    /// Lifecycle state, derived from the signature count.
    pub fn status(&self) -> TxStatus {
        if self.committed.is_some() {
            return TxStatus::Committed;
        }
        match self.signatures.len() as u32 {
            0 => TxStatus::Undefined,
            n if n < self.threshold => TxStatus::PartiallySigned,
            _ => TxStatus::ReadyToCommit,
        }
    }

    /// Control keys that have not signed yet.
    pub fn missing_signers(&self) -> Vec<Address> {
        self.control_keys
            .iter()
            .filter(|k| !self.signatures.contains_key(*k))
            .copied()
            .collect()
    }

    /// Number of signatures collected so far.
    pub fn signature_count(&self) -> u32 {
        self.signatures.len() as u32
    }

    /// Signatures required to commit.
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// The underlying unsigned transaction.
    pub fn unsigned(&self) -> &UnsignedTx {
        &self.unsigned
    }

    /// The node-assigned id, once committed.
    pub fn committed_id(&self) -> Option<TxId> {
        self.committed
    }

    /// Hex-encode the signed envelope for `platform.issueTx`.
    ///
    /// Only meaningful at quorum; callers go through [`commit`].
    ///
    /// [`commit`]: MultisigTx::commit
    fn signed_bytes(&self) -> TxResult<String> {
        let envelope = SignedEnvelope {
            tx: self.unsigned.clone(),
            signatures: self
                .signatures
                .iter()
                .map(|(signer, sig)| SignatureEntry {
                    signer: *signer,
                    signature: alloy::hex::encode_prefixed(sig.as_bytes()),
                })
                .collect(),
        };
        let bytes = serde_json::to_vec(&envelope).map_err(|e| TxError::Serialization(e.to_string()))?;
        Ok(alloy::hex::encode_prefixed(bytes))
    }

    /// Issue the transaction and wait for on-chain acceptance.
    ///
    /// Requires quorum. On success the transaction transitions to
    /// `Committed` and the node-assigned id is recorded; committing twice
    /// is an error.
    pub async fn commit(&mut self, client: &RpcClient) -> TxResult<TxId> {
        if let Some(id) = self.committed {
            return Err(TxError::AlreadyCommitted(id));
        }
        let have = self.signature_count();
        if have < self.threshold {
            return Err(TxError::NotReady {
                have,
                need: self.threshold,
            });
        }

        let signed = self.signed_bytes()?;
        let tx_id = client.issue_tx(&signed).await?;
        client.wait_for_acceptance(&tx_id).await?;

        self.committed = Some(tx_id);
        tracing::info!(kind = self.unsigned.kind(), tx_id = %tx_id, "Transaction committed");
        Ok(tx_id)
    }
}
