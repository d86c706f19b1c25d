//! Contracts: blueprint instances with field values and a lifecycle status.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::blueprint::Blueprint;
use crate::error::{RecordKind, ValidationError};
use crate::field::{ContractField, FieldValue};
use crate::id::new_id;
use crate::timestamp::Timestamp;

/// Lifecycle status of a contract.
///
/// Forward progression follows the declaration order
/// `Created < Approved < Sent < Signed < Locked`. `Revoked` sits outside
/// that order and is absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ContractStatus {
    Created,
    Approved,
    Sent,
    Signed,
    Locked,
    Revoked,
}

impl ContractStatus {
    /// Every status, forward order first, then `Revoked`.
    pub const ALL: [ContractStatus; 6] = [
        ContractStatus::Created,
        ContractStatus::Approved,
        ContractStatus::Sent,
        ContractStatus::Signed,
        ContractStatus::Locked,
        ContractStatus::Revoked,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContractStatus::Created => "Created",
            ContractStatus::Approved => "Approved",
            ContractStatus::Sent => "Sent",
            ContractStatus::Signed => "Signed",
            ContractStatus::Locked => "Locked",
            ContractStatus::Revoked => "Revoked",
        }
    }
}

impl std::fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A contract instance.
///
/// `blueprint_id` is a weak reference: the blueprint is not owned and its
/// later edits never reach `fields`, which is a snapshot taken at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub id: String,
    pub name: String,
    pub blueprint_id: String,
    pub fields: Vec<ContractField>,
    pub status: ContractStatus,
    pub created_at: Timestamp,
}

impl Contract {
    /// Instantiate `blueprint`: fresh id, status `Created`, and a field
    /// snapshot with default values.
    pub fn from_blueprint(blueprint: &Blueprint, name: impl Into<String>) -> Result<Self, ValidationError> {
        let contract = Contract {
            id: new_id(),
            name: name.into(),
            blueprint_id: blueprint.id.clone(),
            fields: blueprint.snapshot_fields(),
            status: ContractStatus::Created,
            created_at: Timestamp::now(),
        };
        contract.validate_new()?;
        Ok(contract)
    }

    /// Checks a contract must pass before it is first stored.
    pub fn validate_new(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingName {
                kind: RecordKind::Contract,
            });
        }
        if self.blueprint_id.trim().is_empty() {
            return Err(ValidationError::MissingBlueprint);
        }
        if self.status != ContractStatus::Created {
            return Err(ValidationError::InitialStatus {
                status: self.status,
            });
        }
        let mut seen = BTreeSet::new();
        for field in &self.fields {
            if !seen.insert(field.id.as_str()) {
                return Err(ValidationError::DuplicateFieldId {
                    field_id: field.id.clone(),
                });
            }
            if let Some(value) = &field.value {
                field.field_type.check_value(&field.id, value)?;
            }
        }
        Ok(())
    }

    pub fn field(&self, field_id: &str) -> Option<&ContractField> {
        self.fields.iter().find(|f| f.id == field_id)
    }

    /// Current values keyed by field id. Absent values map to `None`.
    pub fn field_values(&self) -> BTreeMap<String, Option<FieldValue>> {
        self.fields
            .iter()
            .map(|f| (f.id.clone(), f.value.clone()))
            .collect()
    }
}

/// A requested change to a contract's name and field values.
///
/// Status is deliberately absent: it only moves through the lifecycle
/// transitions. `blueprint_id` exists so that a form resubmitting the
/// original selection is accepted; any other value is rejected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContractEdit {
    pub name: Option<String>,
    pub values: BTreeMap<String, FieldValue>,
    pub blueprint_id: Option<String>,
}

impl ContractEdit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rename(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn set(mut self, field_id: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.values.insert(field_id.into(), value.into());
        self
    }

    pub fn with_blueprint(mut self, blueprint_id: impl Into<String>) -> Self {
        self.blueprint_id = Some(blueprint_id.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.values.is_empty() && self.blueprint_id.is_none()
    }
}
