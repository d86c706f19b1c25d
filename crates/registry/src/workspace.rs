//! The workspace: both stores, their persistence and change notification.
//!
//! Every mutating method runs the same sequence:
//!
//! 1. Clone the affected store and apply the request to the clone. Any
//!    validation, lifecycle or referential-integrity failure is returned
//!    here and nothing has changed.
//! 2. Save the whole staged collection under its storage key. A storage
//!    failure is returned here; the in-memory store is still the old one.
//! 3. Swap the staged store in.
//! 4. Notify subscribers with a [`ChangeEvent`].
//!
//! Operations that turn out to be no-ops (advancing a Locked contract,
//! revoking a Revoked one) stop after step 1 and neither persist nor
//! notify.

use std::collections::BTreeMap;

use pactum_core::{
    Blueprint, BlueprintField, Contract, ContractEdit, ContractStatus, CoreError, FieldValue,
    LifecyclePolicy, RecordKind, Transition, ValidationError,
};
use pactum_storage::{load_collection, save_collection, PactumStorage, StorageKey};

use crate::blueprints::BlueprintStore;
use crate::config::WorkspaceConfig;
use crate::contracts::ContractStore;
use crate::error::RegistryError;
use crate::events::{ChangeEvent, Subscribers, SubscriptionId};
use crate::view::{self, ContractRow};

pub struct Workspace<S = Box<dyn PactumStorage>> {
    storage: S,
    blueprints: BlueprintStore,
    contracts: ContractStore,
    policy: LifecyclePolicy,
    subscribers: Subscribers,
}

impl Workspace<Box<dyn PactumStorage>> {
    /// Open the configured backend and load both collections from it.
    pub fn open(config: &WorkspaceConfig) -> Result<Self, RegistryError> {
        let storage = config.open_storage()?;
        Ok(Workspace::load(storage)?.with_policy(config.lifecycle))
    }
}

impl<S: PactumStorage> Workspace<S> {
    /// Load both collections from `storage`. Keys never written load as
    /// empty collections.
    pub fn load(storage: S) -> Result<Self, RegistryError> {
        let blueprints = load_collection::<Blueprint, _>(&storage, StorageKey::Blueprints)?;
        let contracts = load_collection::<Contract, _>(&storage, StorageKey::Contracts)?;
        tracing::info!(
            backend = storage.backend_name(),
            blueprints = blueprints.len(),
            contracts = contracts.len(),
            "workspace loaded"
        );
        Ok(Workspace {
            storage,
            blueprints: BlueprintStore::from_records(blueprints),
            contracts: ContractStore::from_records(contracts),
            policy: LifecyclePolicy::default(),
            subscribers: Subscribers::default(),
        })
    }

    pub fn with_policy(mut self, policy: LifecyclePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &LifecyclePolicy {
        &self.policy
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    pub fn blueprints(&self) -> &BlueprintStore {
        &self.blueprints
    }

    pub fn contracts(&self) -> &ContractStore {
        &self.contracts
    }

    // ── Blueprints ───────────────────────────────────────────────────────────

    pub fn list_blueprints(&self) -> &[Blueprint] {
        self.blueprints.list()
    }

    pub fn blueprint(&self, id: &str) -> Option<&Blueprint> {
        self.blueprints.get(id)
    }

    /// Name of the blueprint, or `"Unknown Blueprint"` for a dangling id.
    pub fn blueprint_name(&self, id: &str) -> &str {
        self.blueprints.display_name(id)
    }

    /// Build a blueprint with a fresh id and add it.
    pub fn create_blueprint(
        &mut self,
        name: &str,
        fields: Vec<BlueprintField>,
    ) -> Result<Blueprint, RegistryError> {
        let blueprint = checked(
            "create_blueprint",
            Blueprint::new(name, fields).map_err(CoreError::from),
        )?;
        self.add_blueprint(blueprint.clone())?;
        Ok(blueprint)
    }

    pub fn add_blueprint(&mut self, blueprint: Blueprint) -> Result<(), RegistryError> {
        let blueprint_id = blueprint.id.clone();
        let mut staged = self.blueprints.clone();
        checked("add_blueprint", staged.add(blueprint))?;
        self.commit_blueprints(staged, ChangeEvent::BlueprintAdded { blueprint_id })
    }

    /// Replace name and fields of an existing blueprint. Contracts created
    /// from it keep their own field snapshots.
    pub fn update_blueprint(&mut self, blueprint: Blueprint) -> Result<(), RegistryError> {
        let blueprint_id = blueprint.id.clone();
        let mut staged = self.blueprints.clone();
        checked("update_blueprint", staged.update(blueprint))?;
        self.commit_blueprints(staged, ChangeEvent::BlueprintUpdated { blueprint_id })
    }

    /// Delete a blueprint that no contract references.
    pub fn delete_blueprint(&mut self, id: &str) -> Result<Blueprint, RegistryError> {
        let mut staged = self.blueprints.clone();
        let removed = checked("delete_blueprint", staged.delete(id, &self.contracts))?;
        self.commit_blueprints(
            staged,
            ChangeEvent::BlueprintDeleted {
                blueprint_id: id.to_string(),
            },
        )?;
        Ok(removed)
    }

    /// Whether any contract references `blueprint_id`; lets a UI disable
    /// its delete action up front.
    pub fn has_contracts(&self, blueprint_id: &str) -> bool {
        self.contracts.has_contracts(blueprint_id)
    }

    // ── Contracts ────────────────────────────────────────────────────────────

    pub fn list_contracts(&self) -> &[Contract] {
        self.contracts.list()
    }

    pub fn contract(&self, id: &str) -> Option<&Contract> {
        self.contracts.get(id)
    }

    pub fn find_by_blueprint(&self, blueprint_id: &str) -> Vec<&Contract> {
        self.contracts.find_by_blueprint(blueprint_id)
    }

    pub fn list_by_status(&self, status: ContractStatus) -> Vec<&Contract> {
        self.contracts.list_by_status(status)
    }

    pub fn status_counts(&self) -> BTreeMap<ContractStatus, usize> {
        self.contracts.status_counts()
    }

    pub fn is_mutable(&self, id: &str) -> Result<bool, RegistryError> {
        Ok(self.contracts.is_mutable(id)?)
    }

    pub fn field_values(
        &self,
        id: &str,
    ) -> Result<BTreeMap<String, Option<FieldValue>>, RegistryError> {
        Ok(self.contracts.field_values(id)?)
    }

    pub fn contract_rows(&self) -> Vec<ContractRow> {
        view::contract_rows(&self.blueprints, &self.contracts, &self.policy)
    }

    /// Create a contract from a blueprint, snapshotting its fields.
    ///
    /// A blank name or blueprint id is rejected before anything else is
    /// looked at.
    pub fn create_contract(
        &mut self,
        blueprint_id: &str,
        name: &str,
    ) -> Result<Contract, RegistryError> {
        let contract = checked("create_contract", self.build_contract(blueprint_id, name))?;
        self.add_contract(contract.clone())?;
        Ok(contract)
    }

    fn build_contract(&self, blueprint_id: &str, name: &str) -> Result<Contract, CoreError> {
        if name.trim().is_empty() {
            return Err(ValidationError::MissingName {
                kind: RecordKind::Contract,
            }
            .into());
        }
        if blueprint_id.trim().is_empty() {
            return Err(ValidationError::MissingBlueprint.into());
        }
        let blueprint =
            self.blueprints
                .get(blueprint_id)
                .ok_or_else(|| ValidationError::UnknownBlueprint {
                    blueprint_id: blueprint_id.to_string(),
                })?;
        self.contracts.create_from(blueprint, name)
    }

    pub fn add_contract(&mut self, contract: Contract) -> Result<(), RegistryError> {
        let event = ChangeEvent::ContractCreated {
            contract_id: contract.id.clone(),
            blueprint_id: contract.blueprint_id.clone(),
        };
        let mut staged = self.contracts.clone();
        checked("add_contract", staged.add(contract, &self.blueprints))?;
        self.commit_contracts(staged, event)
    }

    /// Edit name and/or field values. Fails with a lifecycle violation
    /// once the contract is Locked or Revoked.
    pub fn update_contract(
        &mut self,
        id: &str,
        edit: &ContractEdit,
    ) -> Result<Contract, RegistryError> {
        let mut staged = self.contracts.clone();
        let edited = checked("update_contract", staged.edit(id, edit).cloned())?;
        self.commit_contracts(
            staged,
            ChangeEvent::ContractEdited {
                contract_id: id.to_string(),
            },
        )?;
        Ok(edited)
    }

    /// Advance one step along Created, Approved, Sent, Signed, Locked.
    /// `Ok(None)` when there is no next status.
    pub fn advance(&mut self, id: &str) -> Result<Option<Transition>, RegistryError> {
        let mut staged = self.contracts.clone();
        let Some(transition) = checked("advance", staged.advance(id))? else {
            tracing::debug!(contract_id = id, "advance: no next status");
            return Ok(None);
        };
        self.commit_transition(staged, transition).map(Some)
    }

    /// Revoke the contract. `Ok(None)` when it already is.
    pub fn revoke(&mut self, id: &str) -> Result<Option<Transition>, RegistryError> {
        let mut staged = self.contracts.clone();
        let Some(transition) = checked("revoke", staged.revoke(id, &self.policy))? else {
            tracing::debug!(contract_id = id, "revoke: already revoked");
            return Ok(None);
        };
        self.commit_transition(staged, transition).map(Some)
    }

    /// Move the contract to `target`, which must be a lifecycle edge from
    /// its current status.
    pub fn transition_to(
        &mut self,
        id: &str,
        target: ContractStatus,
    ) -> Result<Transition, RegistryError> {
        let mut staged = self.contracts.clone();
        let transition = checked(
            "transition_to",
            staged.transition_to(id, target, &self.policy),
        )?;
        self.commit_transition(staged, transition)
    }

    // ── Subscriptions ────────────────────────────────────────────────────────

    /// Register a callback run after every committed change.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&ChangeEvent) + 'static,
    {
        self.subscribers.subscribe(Box::new(callback))
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    // ── Commit ───────────────────────────────────────────────────────────────

    fn commit_blueprints(
        &mut self,
        staged: BlueprintStore,
        event: ChangeEvent,
    ) -> Result<(), RegistryError> {
        save_collection(&mut self.storage, StorageKey::Blueprints, staged.list())
            .inspect_err(|e| tracing::error!(error = %e, "failed to persist blueprints"))?;
        self.blueprints = staged;
        tracing::info!(event = ?event, blueprints = self.blueprints.len(), "committed");
        self.subscribers.notify(&event);
        Ok(())
    }

    fn commit_contracts(
        &mut self,
        staged: ContractStore,
        event: ChangeEvent,
    ) -> Result<(), RegistryError> {
        save_collection(&mut self.storage, StorageKey::Contracts, staged.list())
            .inspect_err(|e| tracing::error!(error = %e, "failed to persist contracts"))?;
        self.contracts = staged;
        tracing::info!(event = ?event, contracts = self.contracts.len(), "committed");
        self.subscribers.notify(&event);
        Ok(())
    }

    fn commit_transition(
        &mut self,
        staged: ContractStore,
        transition: Transition,
    ) -> Result<Transition, RegistryError> {
        self.commit_contracts(staged, ChangeEvent::ContractTransitioned(transition.clone()))?;
        Ok(transition)
    }
}

/// Log and convert a rejected request.
fn checked<T>(op: &'static str, result: Result<T, CoreError>) -> Result<T, RegistryError> {
    result.map_err(|error| {
        tracing::warn!(op, %error, "request rejected");
        RegistryError::Core(error)
    })
}
