use crate::contract::ContractStatus;
use crate::field::FieldType;

/// The kind of record an id refers to, for not-found reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Blueprint,
    Contract,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::Blueprint => write!(f, "blueprint"),
            RecordKind::Contract => write!(f, "contract"),
        }
    }
}

/// Missing or malformed input, detected before any collection is touched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A blueprint or contract was submitted without a name.
    #[error("{kind} name is required")]
    MissingName { kind: RecordKind },

    /// A contract was submitted without selecting a blueprint.
    #[error("a blueprint must be selected")]
    MissingBlueprint,

    /// The selected blueprint does not exist.
    #[error("blueprint not found: {blueprint_id}")]
    UnknownBlueprint { blueprint_id: String },

    /// A blueprint field was submitted without a label.
    #[error("field label is required")]
    MissingFieldLabel,

    /// Two fields in one blueprint share an id.
    #[error("duplicate field id '{field_id}'")]
    DuplicateFieldId { field_id: String },

    /// A field coordinate is NaN or infinite and could not be stored.
    #[error("field '{field_id}' has a non-finite position")]
    InvalidPosition { field_id: String },

    /// A record with this id is already stored.
    #[error("{kind} with id '{id}' already exists")]
    DuplicateId { kind: RecordKind, id: String },

    /// A contract must enter its store in the `Created` status.
    #[error("new contract must have status Created, got {status}")]
    InitialStatus { status: ContractStatus },

    /// A value was supplied for a field the contract does not have.
    #[error("contract has no field '{field_id}'")]
    UnknownField { field_id: String },

    /// The value's shape does not match the field type.
    #[error("field '{field_id}' of type {expected} cannot hold this value")]
    ValueTypeMismatch {
        field_id: String,
        expected: FieldType,
    },

    /// A date field value is not a `YYYY-MM-DD` calendar date.
    #[error("field '{field_id}' expects a date (YYYY-MM-DD), got '{value}'")]
    InvalidDate { field_id: String, value: String },

    /// An existing contract cannot be moved to another blueprint.
    #[error("contract '{contract_id}' is bound to blueprint '{current}' and cannot move to '{requested}'")]
    BlueprintReassignment {
        contract_id: String,
        current: String,
        requested: String,
    },
}

/// A mutation or transition the lifecycle forbids.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LifecycleViolation {
    /// Name or field values changed on a Locked or Revoked contract.
    #[error("cannot edit contract '{contract_id}': status {status} is not editable")]
    Immutable {
        contract_id: String,
        status: ContractStatus,
    },

    /// The requested status change is not an edge of the lifecycle.
    #[error("contract '{contract_id}' cannot move from {from} to {to}")]
    InvalidTransition {
        contract_id: String,
        from: ContractStatus,
        to: ContractStatus,
    },
}

/// Blueprint deletion blocked by contracts that still reference it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot delete blueprint '{blueprint_id}': {contract_count} contract(s) use it")]
pub struct ReferentialIntegrityViolation {
    pub blueprint_id: String,
    pub contract_count: usize,
}

/// Every error the core can surface to a caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Lifecycle(#[from] LifecycleViolation),

    #[error(transparent)]
    ReferentialIntegrity(#[from] ReferentialIntegrityViolation),

    /// Update or lookup of an id that is not stored.
    #[error("{kind} not found: {id}")]
    NotFound { kind: RecordKind, id: String },
}

impl CoreError {
    pub fn not_found(kind: RecordKind, id: impl Into<String>) -> Self {
        CoreError::NotFound {
            kind,
            id: id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_user_readable() {
        let err = CoreError::from(ReferentialIntegrityViolation {
            blueprint_id: "bp-1".to_string(),
            contract_count: 2,
        });
        assert_eq!(
            err.to_string(),
            "cannot delete blueprint 'bp-1': 2 contract(s) use it"
        );

        let err = CoreError::from(LifecycleViolation::Immutable {
            contract_id: "c-1".to_string(),
            status: ContractStatus::Locked,
        });
        assert_eq!(
            err.to_string(),
            "cannot edit contract 'c-1': status Locked is not editable"
        );

        let err = CoreError::from(ValidationError::MissingName {
            kind: RecordKind::Contract,
        });
        assert_eq!(err.to_string(), "contract name is required");
    }

    #[test]
    fn not_found_names_the_record_kind() {
        let err = CoreError::not_found(RecordKind::Blueprint, "missing");
        assert_eq!(err.to_string(), "blueprint not found: missing");
    }
}
