//! Contract store: the contract collection and its lifecycle operations.
//!
//! The store itself is a passive collection: [`ContractStore::update`]
//! replaces a record unconditionally. Whether a change is allowed is
//! decided only by `pactum_core::lifecycle`; the `edit`, `advance`,
//! `revoke` and `transition_to` methods run the engine on a copy and then
//! hand the result to `update`.

use std::collections::BTreeMap;

use pactum_core::lifecycle::{self, LifecyclePolicy, Transition};
use pactum_core::{
    Blueprint, Contract, ContractEdit, ContractStatus, CoreError, FieldValue, RecordKind,
    ValidationError,
};

use crate::blueprints::BlueprintStore;

/// Ordered contract collection. Contracts are never removed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContractStore {
    contracts: Vec<Contract>,
}

impl ContractStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a collection loaded from storage, as is.
    pub fn from_records(contracts: Vec<Contract>) -> Self {
        ContractStore { contracts }
    }

    pub fn list(&self) -> &[Contract] {
        &self.contracts
    }

    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Contract> {
        self.contracts.iter().find(|c| c.id == id)
    }

    fn require(&self, id: &str) -> Result<&Contract, CoreError> {
        self.get(id)
            .ok_or_else(|| CoreError::not_found(RecordKind::Contract, id))
    }

    // ── Queries ──────────────────────────────────────────────────────────

    /// All contracts referencing `blueprint_id`, in collection order.
    pub fn find_by_blueprint(&self, blueprint_id: &str) -> Vec<&Contract> {
        self.contracts
            .iter()
            .filter(|c| c.blueprint_id == blueprint_id)
            .collect()
    }

    pub fn count_for_blueprint(&self, blueprint_id: &str) -> usize {
        self.contracts
            .iter()
            .filter(|c| c.blueprint_id == blueprint_id)
            .count()
    }

    pub fn has_contracts(&self, blueprint_id: &str) -> bool {
        self.contracts.iter().any(|c| c.blueprint_id == blueprint_id)
    }

    pub fn list_by_status(&self, status: ContractStatus) -> Vec<&Contract> {
        self.contracts.iter().filter(|c| c.status == status).collect()
    }

    /// Number of contracts per status. Every status is present, zero
    /// counts included.
    pub fn status_counts(&self) -> BTreeMap<ContractStatus, usize> {
        let mut counts: BTreeMap<ContractStatus, usize> =
            ContractStatus::ALL.iter().map(|s| (*s, 0)).collect();
        for c in &self.contracts {
            *counts.entry(c.status).or_default() += 1;
        }
        counts
    }

    pub fn is_mutable(&self, id: &str) -> Result<bool, CoreError> {
        Ok(lifecycle::is_mutable(self.require(id)?))
    }

    /// Current values of a contract keyed by field id.
    pub fn field_values(&self, id: &str) -> Result<BTreeMap<String, Option<FieldValue>>, CoreError> {
        Ok(self.require(id)?.field_values())
    }

    // ── Creation ─────────────────────────────────────────────────────────

    /// Build (but do not store) a new contract from `blueprint`, with the
    /// blueprint's fields snapshotted at their default values.
    pub fn create_from(&self, blueprint: &Blueprint, name: &str) -> Result<Contract, CoreError> {
        Ok(Contract::from_blueprint(blueprint, name)?)
    }

    /// Append a new contract.
    ///
    /// The contract must be in `Created`, have a name, and reference a
    /// blueprint that exists in `blueprints`.
    pub fn add(&mut self, contract: Contract, blueprints: &BlueprintStore) -> Result<(), CoreError> {
        contract.validate_new()?;
        if !blueprints.contains(&contract.blueprint_id) {
            return Err(ValidationError::UnknownBlueprint {
                blueprint_id: contract.blueprint_id,
            }
            .into());
        }
        if self.get(&contract.id).is_some() {
            return Err(ValidationError::DuplicateId {
                kind: RecordKind::Contract,
                id: contract.id,
            }
            .into());
        }
        self.contracts.push(contract);
        Ok(())
    }

    // ── Mutation ─────────────────────────────────────────────────────────

    /// Replace the stored contract with the same id. No lifecycle checks
    /// happen here.
    pub fn update(&mut self, contract: Contract) -> Result<(), CoreError> {
        let stored = self
            .contracts
            .iter_mut()
            .find(|c| c.id == contract.id)
            .ok_or_else(|| CoreError::not_found(RecordKind::Contract, &contract.id))?;
        *stored = contract;
        Ok(())
    }

    /// Change name and/or field values, if the lifecycle permits.
    pub fn edit(&mut self, id: &str, edit: &ContractEdit) -> Result<&Contract, CoreError> {
        let mut staged = self.require(id)?.clone();
        lifecycle::apply_edit(&mut staged, edit)?;
        self.update(staged)?;
        self.require(id)
    }

    /// Step the contract forward. `Ok(None)` when it is Locked or Revoked.
    pub fn advance(&mut self, id: &str) -> Result<Option<Transition>, CoreError> {
        let mut staged = self.require(id)?.clone();
        let Some(transition) = lifecycle::advance(&mut staged) else {
            return Ok(None);
        };
        self.update(staged)?;
        Ok(Some(transition))
    }

    /// Revoke the contract. `Ok(None)` when it is already Revoked.
    pub fn revoke(&mut self, id: &str, policy: &LifecyclePolicy) -> Result<Option<Transition>, CoreError> {
        let mut staged = self.require(id)?.clone();
        let Some(transition) = lifecycle::revoke(&mut staged, policy)? else {
            return Ok(None);
        };
        self.update(staged)?;
        Ok(Some(transition))
    }

    /// Move to an explicit target, which must be a lifecycle edge.
    pub fn transition_to(
        &mut self,
        id: &str,
        target: ContractStatus,
        policy: &LifecyclePolicy,
    ) -> Result<Transition, CoreError> {
        let mut staged = self.require(id)?.clone();
        let transition = lifecycle::transition_to(&mut staged, target, policy)?;
        self.update(staged)?;
        Ok(transition)
    }
}
