//! Validator management with staking checks.
//!
//! # Responsibilities
//! - Validate validator parameters against network and config bounds
//! - Build AddValidator / RemoveValidator multisig transactions
//!
//! Checks run locally before any transaction is built: a doomed
//! transaction never reaches the signature-collection stage.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::StakingConfig;
use crate::rpc::types::{NodeId, StakeLimits, ValidatorInfo};
use crate::subnet::deploy::Subnet;
use crate::subnet::{SubnetError, SubnetResult};
use crate::tx::{MultisigTx, UnsignedTx};

/// Parameters for one validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorSpec {
    /// The validating node.
    pub node_id: NodeId,

    /// Validator weight.
    pub weight: u64,

    /// Validation start, unix seconds.
    pub start_time: u64,

    /// Validation end, unix seconds.
    pub end_time: u64,
}

impl ValidatorSpec {
    /// Check these parameters against staking bounds as of `now`.
    pub fn validate(
        &self,
        limits: &StakeLimits,
        staking: &StakingConfig,
        now: u64,
    ) -> SubnetResult<()> {
        let min_weight = staking.min_weight.max(limits.min_validator_stake);
        if self.weight < min_weight {
            return Err(SubnetError::WeightBelowMinimum {
                weight: self.weight,
                min: min_weight,
            });
        }

        if self.start_time <= now {
            return Err(SubnetError::StartTimeInPast {
                start: self.start_time,
                now,
            });
        }
        if self.end_time <= self.start_time {
            return Err(SubnetError::EndBeforeStart {
                start: self.start_time,
                end: self.end_time,
            });
        }

        let duration = self.end_time - self.start_time;
        if duration < staking.min_duration_secs || duration > staking.max_duration_secs {
            return Err(SubnetError::DurationOutOfBounds {
                secs: duration,
                min: staking.min_duration_secs,
                max: staking.max_duration_secs,
            });
        }

        Ok(())
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

impl Subnet {
    /// Build the transaction that adds a validator to this subnet.
    ///
    /// `current` is the subnet's present validator set, as returned by
    /// `platform.getCurrentValidators`; a node already in it is rejected.
    pub fn add_validator_tx(
        &self,
        spec: &ValidatorSpec,
        limits: &StakeLimits,
        staking: &StakingConfig,
        current: &[ValidatorInfo],
    ) -> SubnetResult<MultisigTx> {
        let subnet_id = self.committed_id()?;

        if current.iter().any(|v| v.node_id == spec.node_id) {
            return Err(SubnetError::DuplicateValidator(spec.node_id.clone()));
        }
        spec.validate(limits, staking, unix_now())?;

        let unsigned = UnsignedTx::AddValidator {
            subnet_id,
            node_id: spec.node_id.clone(),
            weight: spec.weight,
            start_time: spec.start_time,
            end_time: spec.end_time,
        };
        Ok(MultisigTx::new(
            unsigned,
            self.control_keys().to_vec(),
            self.threshold(),
        )?)
    }

    /// Build the transaction that removes a validator from this subnet.
    pub fn remove_validator_tx(
        &self,
        node_id: &NodeId,
        current: &[ValidatorInfo],
    ) -> SubnetResult<MultisigTx> {
        let subnet_id = self.committed_id()?;

        if !current.iter().any(|v| v.node_id == *node_id) {
            return Err(SubnetError::ValidatorNotFound(node_id.clone()));
        }

        let unsigned = UnsignedTx::RemoveValidator {
            subnet_id,
            node_id: node_id.clone(),
        };
        Ok(MultisigTx::new(
            unsigned,
            self.control_keys().to_vec(),
            self.threshold(),
        )?)
    }
}
