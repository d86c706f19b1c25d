//! Blueprint store: the blueprint collection and its deletion guard.

use pactum_core::{Blueprint, CoreError, RecordKind, ReferentialIntegrityViolation, ValidationError};

use crate::contracts::ContractStore;

/// Name shown for a contract whose blueprint id does not resolve.
pub const UNKNOWN_BLUEPRINT: &str = "Unknown Blueprint";

/// Ordered blueprint collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlueprintStore {
    blueprints: Vec<Blueprint>,
}

impl BlueprintStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a collection loaded from storage, as is.
    pub fn from_records(blueprints: Vec<Blueprint>) -> Self {
        BlueprintStore { blueprints }
    }

    pub fn list(&self) -> &[Blueprint] {
        &self.blueprints
    }

    pub fn len(&self) -> usize {
        self.blueprints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blueprints.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Blueprint> {
        self.blueprints.iter().find(|b| b.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn name_of(&self, id: &str) -> Option<&str> {
        self.get(id).map(|b| b.name.as_str())
    }

    /// Name for display joins; [`UNKNOWN_BLUEPRINT`] when `id` is dangling.
    pub fn display_name(&self, id: &str) -> &str {
        self.name_of(id).unwrap_or(UNKNOWN_BLUEPRINT)
    }

    /// Append a blueprint. Names need not be unique; ids must be.
    pub fn add(&mut self, blueprint: Blueprint) -> Result<(), CoreError> {
        blueprint.validate()?;
        if self.contains(&blueprint.id) {
            return Err(ValidationError::DuplicateId {
                kind: RecordKind::Blueprint,
                id: blueprint.id,
            }
            .into());
        }
        self.blueprints.push(blueprint);
        Ok(())
    }

    /// Replace name and fields of the stored blueprint with the same id,
    /// in place. `created_at` keeps its original value.
    ///
    /// Existing contracts are unaffected: they hold field snapshots.
    pub fn update(&mut self, blueprint: Blueprint) -> Result<(), CoreError> {
        blueprint.validate()?;
        let stored = self
            .blueprints
            .iter_mut()
            .find(|b| b.id == blueprint.id)
            .ok_or_else(|| CoreError::not_found(RecordKind::Blueprint, &blueprint.id))?;
        stored.name = blueprint.name;
        stored.fields = blueprint.fields;
        Ok(())
    }

    /// Remove a blueprint no contract references.
    ///
    /// Fails with [`ReferentialIntegrityViolation`] while any contract in
    /// `contracts` has this `blueprint_id`; both collections are left
    /// unchanged in that case.
    pub fn delete(&mut self, id: &str, contracts: &ContractStore) -> Result<Blueprint, CoreError> {
        let contract_count = contracts.count_for_blueprint(id);
        if contract_count > 0 {
            return Err(ReferentialIntegrityViolation {
                blueprint_id: id.to_string(),
                contract_count,
            }
            .into());
        }
        let pos = self
            .blueprints
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| CoreError::not_found(RecordKind::Blueprint, id))?;
        Ok(self.blueprints.remove(pos))
    }
}
