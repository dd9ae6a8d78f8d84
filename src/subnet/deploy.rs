//! Subnet and blockchain deployment helpers.

use alloy::primitives::{Address, Bytes};

use crate::keychain::Keychain;
use crate::rpc::RpcClient;
use crate::subnet::{SubnetError, SubnetResult};
use crate::tx::{validate_owners, MultisigTx, TxId, UnsignedTx};

/// A subnet under this SDK's management.
///
/// `id` is `None` until the creating transaction is committed; chain and
/// validator operations require it.
#[derive(Debug, Clone)]
pub struct Subnet {
    id: Option<TxId>,
    control_keys: Vec<Address>,
    threshold: u32,
}

impl Subnet {
    /// Describe a new subnet. Validates the owner set immediately.
    pub fn new(control_keys: Vec<Address>, threshold: u32) -> SubnetResult<Self> {
        validate_owners(&control_keys, threshold)?;
        Ok(Self {
            id: None,
            control_keys,
            threshold,
        })
    }

    /// Wrap a subnet that already exists on-chain.
    pub fn existing(id: TxId, control_keys: Vec<Address>, threshold: u32) -> SubnetResult<Self> {
        validate_owners(&control_keys, threshold)?;
        Ok(Self {
            id: Some(id),
            control_keys,
            threshold,
        })
    }

    /// The on-chain subnet id, once committed.
    pub fn id(&self) -> Option<TxId> {
        self.id
    }

    /// Whether the subnet exists on-chain.
    pub fn is_committed(&self) -> bool {
        self.id.is_some()
    }

    /// Addresses allowed to modify the subnet.
    pub fn control_keys(&self) -> &[Address] {
        &self.control_keys
    }

    /// Signatures required to modify the subnet.
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// The id of the subnet, or an error if it has not been committed.
    pub(crate) fn committed_id(&self) -> SubnetResult<TxId> {
        self.id.ok_or(SubnetError::NotCommitted)
    }

    /// Build the transaction that creates this subnet on-chain.
    pub fn create_subnet_tx(&self) -> SubnetResult<MultisigTx> {
        let unsigned = UnsignedTx::CreateSubnet {
            control_keys: self.control_keys.clone(),
            threshold: self.threshold,
        };
        Ok(MultisigTx::new(
            unsigned,
            self.control_keys.clone(),
            self.threshold,
        )?)
    }

    /// Record the id assigned when the creating transaction was accepted.
    pub fn mark_committed(&mut self, id: TxId) {
        self.id = Some(id);
    }

    /// Sign and commit the subnet creation in one step.
    ///
    /// Only works when the keychain can reach quorum on its own; with
    /// remote co-signers, use [`create_subnet_tx`], circulate it, and call
    /// [`mark_committed`] with the accepted id.
    ///
    /// [`create_subnet_tx`]: Subnet::create_subnet_tx
    /// [`mark_committed`]: Subnet::mark_committed
    pub async fn deploy(&mut self, client: &RpcClient, keychain: &Keychain) -> SubnetResult<TxId> {
        let mut tx = self.create_subnet_tx()?;
        tx.sign(keychain).map_err(SubnetError::Tx)?;
        let id = tx.commit(client).await.map_err(SubnetError::Tx)?;
        self.id = Some(id);
        tracing::info!(subnet_id = %id, "Subnet deployed");
        Ok(id)
    }

    /// Build the transaction that creates a blockchain inside this subnet.
    ///
    /// The subnet must be committed. `genesis` is opaque to the SDK but
    /// must be non-empty; the chain name must be non-empty printable ASCII.
    pub fn create_blockchain_tx(
        &self,
        vm_id: &str,
        name: &str,
        genesis: impl Into<Bytes>,
    ) -> SubnetResult<MultisigTx> {
        let subnet_id = self.committed_id()?;

        if name.is_empty() || !name.chars().all(|c| c.is_ascii() && !c.is_ascii_control()) {
            return Err(SubnetError::InvalidChainName(name.to_string()));
        }
        let genesis = genesis.into();
        if genesis.is_empty() {
            return Err(SubnetError::EmptyGenesis);
        }

        let unsigned = UnsignedTx::CreateBlockchain {
            subnet_id,
            vm_id: vm_id.to_string(),
            name: name.to_string(),
            genesis,
        };
        Ok(MultisigTx::new(
            unsigned,
            self.control_keys.clone(),
            self.threshold,
        )?)
    }
}
