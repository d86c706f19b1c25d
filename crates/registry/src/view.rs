//! Display joins for list views.

use pactum_core::lifecycle::{self, LifecyclePolicy};
use pactum_core::{ContractStatus, Timestamp};

use crate::blueprints::BlueprintStore;
use crate::contracts::ContractStore;

/// One row of the contract dashboard: the contract joined with its
/// blueprint's name and the actions its status allows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractRow {
    pub id: String,
    pub name: String,
    pub blueprint_name: String,
    pub status: ContractStatus,
    pub created_at: Timestamp,
    pub can_advance: bool,
    pub can_revoke: bool,
    pub mutable: bool,
}

pub fn contract_rows(
    blueprints: &BlueprintStore,
    contracts: &ContractStore,
    policy: &LifecyclePolicy,
) -> Vec<ContractRow> {
    contracts
        .list()
        .iter()
        .map(|c| ContractRow {
            id: c.id.clone(),
            name: c.name.clone(),
            blueprint_name: blueprints.display_name(&c.blueprint_id).to_string(),
            status: c.status,
            created_at: c.created_at,
            can_advance: lifecycle::can_advance(c.status),
            can_revoke: lifecycle::can_revoke(c.status, policy),
            mutable: lifecycle::is_mutable(c),
        })
        .collect()
}
