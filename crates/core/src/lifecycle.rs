//! Contract lifecycle engine.
//!
//! Pure rules over a contract's status:
//! 1. `advance` moves one step along `Created → Approved → Sent → Signed → Locked`
//! 2. `revoke` moves any non-revoked contract to `Revoked`
//! 3. `is_mutable` decides whether name and field values may change
//! 4. `apply_edit` validates and applies a name/value edit atomically
//!
//! Stores never decide mutability themselves; they call into this module.
//! Advancing a terminal contract and revoking a revoked one are defined
//! no-ops and return `None` rather than an error.

use serde::{Deserialize, Serialize};

use crate::contract::{Contract, ContractEdit, ContractStatus};
use crate::error::{CoreError, LifecycleViolation, RecordKind, ValidationError};

// ──────────────────────────────────────────────
// Transition table
// ──────────────────────────────────────────────

/// The forward order walked by `advance`.
pub const FORWARD_ORDER: [ContractStatus; 5] = [
    ContractStatus::Created,
    ContractStatus::Approved,
    ContractStatus::Sent,
    ContractStatus::Signed,
    ContractStatus::Locked,
];

/// Tunable lifecycle rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecyclePolicy {
    /// Whether a `Locked` contract may still be revoked. Locked contracts
    /// are never editable either way; this only governs the status edge.
    pub revoke_locked: bool,
}

impl Default for LifecyclePolicy {
    fn default() -> Self {
        LifecyclePolicy {
            revoke_locked: true,
        }
    }
}

/// Record of a single status change applied to a contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub contract_id: String,
    pub from: ContractStatus,
    pub to: ContractStatus,
}

/// The status `advance` moves to, or `None` for `Locked` and `Revoked`.
pub fn next_status(status: ContractStatus) -> Option<ContractStatus> {
    let idx = FORWARD_ORDER.iter().position(|s| *s == status)?;
    FORWARD_ORDER.get(idx + 1).copied()
}

pub fn can_advance(status: ContractStatus) -> bool {
    next_status(status).is_some()
}

pub fn can_revoke(status: ContractStatus, policy: &LifecyclePolicy) -> bool {
    match status {
        ContractStatus::Revoked => false,
        ContractStatus::Locked => policy.revoke_locked,
        _ => true,
    }
}

/// Every status reachable from `from` in one step.
pub fn allowed_transitions(from: ContractStatus, policy: &LifecyclePolicy) -> Vec<ContractStatus> {
    let mut out: Vec<ContractStatus> = next_status(from).into_iter().collect();
    if can_revoke(from, policy) {
        out.push(ContractStatus::Revoked);
    }
    out
}

pub fn is_allowed(from: ContractStatus, to: ContractStatus, policy: &LifecyclePolicy) -> bool {
    allowed_transitions(from, policy).contains(&to)
}

// ──────────────────────────────────────────────
// Mutability
// ──────────────────────────────────────────────

/// `false` for `Locked` and `Revoked`, `true` otherwise.
pub fn is_mutable_status(status: ContractStatus) -> bool {
    !matches!(status, ContractStatus::Locked | ContractStatus::Revoked)
}

pub fn is_mutable(contract: &Contract) -> bool {
    is_mutable_status(contract.status)
}

pub fn ensure_mutable(contract: &Contract) -> Result<(), LifecycleViolation> {
    if is_mutable(contract) {
        Ok(())
    } else {
        Err(LifecycleViolation::Immutable {
            contract_id: contract.id.clone(),
            status: contract.status,
        })
    }
}

// ──────────────────────────────────────────────
// Transitions
// ──────────────────────────────────────────────

/// Move one step forward. No-op (returns `None`) on `Locked` and `Revoked`.
pub fn advance(contract: &mut Contract) -> Option<Transition> {
    let to = next_status(contract.status)?;
    Some(apply(contract, to))
}

/// Move to `Revoked`. No-op on an already revoked contract.
///
/// Revoking a `Locked` contract is governed by
/// [`LifecyclePolicy::revoke_locked`].
pub fn revoke(
    contract: &mut Contract,
    policy: &LifecyclePolicy,
) -> Result<Option<Transition>, LifecycleViolation> {
    if contract.status == ContractStatus::Revoked {
        return Ok(None);
    }
    if !can_revoke(contract.status, policy) {
        return Err(invalid(contract, ContractStatus::Revoked));
    }
    Ok(Some(apply(contract, ContractStatus::Revoked)))
}

/// Move to an explicit target status, which must be an edge of the
/// lifecycle. Unlike `advance`/`revoke` there are no silent no-ops here:
/// asking for a non-edge, including the current status, is an error.
pub fn transition_to(
    contract: &mut Contract,
    target: ContractStatus,
    policy: &LifecyclePolicy,
) -> Result<Transition, LifecycleViolation> {
    if !is_allowed(contract.status, target, policy) {
        return Err(invalid(contract, target));
    }
    Ok(apply(contract, target))
}

fn apply(contract: &mut Contract, to: ContractStatus) -> Transition {
    let from = contract.status;
    contract.status = to;
    Transition {
        contract_id: contract.id.clone(),
        from,
        to,
    }
}

fn invalid(contract: &Contract, to: ContractStatus) -> LifecycleViolation {
    LifecycleViolation::InvalidTransition {
        contract_id: contract.id.clone(),
        from: contract.status,
        to,
    }
}

// ──────────────────────────────────────────────
// Edits
// ──────────────────────────────────────────────

/// Validate `edit` completely, then apply it.
///
/// Checks, in order: the contract is mutable, the blueprint is not being
/// changed, a new name is non-blank, and every value targets an existing
/// field with a compatible type. On error the contract is untouched.
pub fn apply_edit(contract: &mut Contract, edit: &ContractEdit) -> Result<(), CoreError> {
    ensure_mutable(contract)?;

    if let Some(requested) = &edit.blueprint_id {
        if *requested != contract.blueprint_id {
            return Err(ValidationError::BlueprintReassignment {
                contract_id: contract.id.clone(),
                current: contract.blueprint_id.clone(),
                requested: requested.clone(),
            }
            .into());
        }
    }

    if let Some(name) = &edit.name {
        if name.trim().is_empty() {
            return Err(ValidationError::MissingName {
                kind: RecordKind::Contract,
            }
            .into());
        }
    }

    for (field_id, value) in &edit.values {
        let field = contract
            .field(field_id)
            .ok_or_else(|| ValidationError::UnknownField {
                field_id: field_id.clone(),
            })?;
        field.field_type.check_value(field_id, value)?;
    }

    if let Some(name) = &edit.name {
        contract.name = name.clone();
    }
    for field in &mut contract.fields {
        if let Some(value) = edit.values.get(&field.id) {
            field.value = Some(value.clone());
        }
    }
    Ok(())
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blueprint::Blueprint;
    use crate::field::{BlueprintField, FieldType, FieldValue};

    fn make_contract() -> Contract {
        let bp = Blueprint::new(
            "NDA",
            vec![
                BlueprintField::new("Signer", FieldType::Text).unwrap(),
                BlueprintField::new("Agree", FieldType::Checkbox).unwrap(),
            ],
        )
        .unwrap();
        Contract::from_blueprint(&bp, "Acme NDA").unwrap()
    }

    fn at_status(status: ContractStatus) -> Contract {
        let mut c = make_contract();
        c.status = status;
        c
    }

    // ──────────────────────────────────────
    // advance
    // ──────────────────────────────────────

    #[test]
    fn advance_walks_forward_order_then_stops() {
        let mut c = make_contract();
        let mut visited = vec![c.status];
        while let Some(t) = advance(&mut c) {
            assert_eq!(t.contract_id, c.id);
            assert_eq!(t.to, c.status);
            visited.push(c.status);
        }
        assert_eq!(visited, FORWARD_ORDER.to_vec());
        for _ in 0..3 {
            assert_eq!(advance(&mut c), None);
            assert_eq!(c.status, ContractStatus::Locked);
        }
    }

    #[test]
    fn advance_on_revoked_is_noop() {
        let mut c = at_status(ContractStatus::Revoked);
        let before = c.clone();
        assert_eq!(advance(&mut c), None);
        assert_eq!(c, before);
    }

    // ──────────────────────────────────────
    // revoke
    // ──────────────────────────────────────

    #[test]
    fn revoke_from_every_forward_status() {
        let policy = LifecyclePolicy::default();
        for status in FORWARD_ORDER {
            let mut c = at_status(status);
            let t = revoke(&mut c, &policy).unwrap().unwrap();
            assert_eq!(t.from, status);
            assert_eq!(t.to, ContractStatus::Revoked);
        }
    }

    #[test]
    fn revoke_is_idempotent() {
        let policy = LifecyclePolicy::default();
        let mut once = make_contract();
        revoke(&mut once, &policy).unwrap();
        let mut twice = once.clone();
        assert_eq!(revoke(&mut twice, &policy).unwrap(), None);
        assert_eq!(once, twice);
        assert_eq!(twice.status, ContractStatus::Revoked);
    }

    #[test]
    fn revoke_locked_can_be_disabled() {
        let strict = LifecyclePolicy {
            revoke_locked: false,
        };
        let mut c = at_status(ContractStatus::Locked);
        match revoke(&mut c, &strict) {
            Err(LifecycleViolation::InvalidTransition { from, to, .. }) => {
                assert_eq!(from, ContractStatus::Locked);
                assert_eq!(to, ContractStatus::Revoked);
            }
            other => panic!("expected InvalidTransition, got {:?}", other),
        }
        assert_eq!(c.status, ContractStatus::Locked);
    }

    // ──────────────────────────────────────
    // transition table
    // ──────────────────────────────────────

    #[test]
    fn allowed_transitions_match_table() {
        let policy = LifecyclePolicy::default();
        use ContractStatus::*;
        assert_eq!(allowed_transitions(Created, &policy), vec![Approved, Revoked]);
        assert_eq!(allowed_transitions(Approved, &policy), vec![Sent, Revoked]);
        assert_eq!(allowed_transitions(Sent, &policy), vec![Signed, Revoked]);
        assert_eq!(allowed_transitions(Signed, &policy), vec![Locked, Revoked]);
        assert_eq!(allowed_transitions(Locked, &policy), vec![Revoked]);
        assert!(allowed_transitions(Revoked, &policy).is_empty());

        let strict = LifecyclePolicy {
            revoke_locked: false,
        };
        assert!(allowed_transitions(Locked, &strict).is_empty());
    }

    #[test]
    fn transition_to_rejects_skips_and_backwards_moves() {
        let policy = LifecyclePolicy::default();
        let mut c = at_status(ContractStatus::Approved);
        assert!(transition_to(&mut c, ContractStatus::Signed, &policy).is_err());
        assert!(transition_to(&mut c, ContractStatus::Created, &policy).is_err());
        assert!(transition_to(&mut c, ContractStatus::Approved, &policy).is_err());
        assert_eq!(c.status, ContractStatus::Approved);

        let t = transition_to(&mut c, ContractStatus::Sent, &policy).unwrap();
        assert_eq!((t.from, t.to), (ContractStatus::Approved, ContractStatus::Sent));
    }

    // ──────────────────────────────────────
    // mutability and edits
    // ──────────────────────────────────────

    #[test]
    fn mutable_iff_not_locked_or_revoked() {
        for status in ContractStatus::ALL {
            let expected = !matches!(status, ContractStatus::Locked | ContractStatus::Revoked);
            assert_eq!(is_mutable(&at_status(status)), expected, "{status}");
        }
    }

    #[test]
    fn edit_updates_name_and_values() {
        let mut c = make_contract();
        let signer = c.fields[0].id.clone();
        let agree = c.fields[1].id.clone();
        let edit = ContractEdit::new()
            .rename("Acme NDA v2")
            .set(&signer, "Jane Roe")
            .set(&agree, true);
        apply_edit(&mut c, &edit).unwrap();
        assert_eq!(c.name, "Acme NDA v2");
        assert_eq!(c.fields[0].value, Some(FieldValue::Text("Jane Roe".into())));
        assert_eq!(c.fields[1].value, Some(FieldValue::Flag(true)));
    }

    #[test]
    fn edit_on_locked_or_revoked_is_a_lifecycle_violation() {
        for status in [ContractStatus::Locked, ContractStatus::Revoked] {
            let mut c = at_status(status);
            let before = c.clone();
            let err = apply_edit(&mut c, &ContractEdit::new().rename("x")).unwrap_err();
            assert!(matches!(
                err,
                CoreError::Lifecycle(LifecycleViolation::Immutable { .. })
            ));
            assert_eq!(c, before);
        }
    }

    #[test]
    fn edit_is_all_or_nothing() {
        let mut c = make_contract();
        let signer = c.fields[0].id.clone();
        let before = c.clone();
        let edit = ContractEdit::new()
            .rename("Renamed")
            .set(&signer, "Jane Roe")
            .set("no-such-field", "x");
        let err = apply_edit(&mut c, &edit).unwrap_err();
        assert_eq!(
            err,
            CoreError::Validation(ValidationError::UnknownField {
                field_id: "no-such-field".to_string()
            })
        );
        assert_eq!(c, before);
    }

    #[test]
    fn edit_cannot_change_blueprint() {
        let mut c = make_contract();
        let same = ContractEdit::new().with_blueprint(c.blueprint_id.clone());
        assert!(apply_edit(&mut c, &same).is_ok());

        let other = ContractEdit::new().with_blueprint("another-blueprint");
        assert!(matches!(
            apply_edit(&mut c, &other),
            Err(CoreError::Validation(
                ValidationError::BlueprintReassignment { .. }
            ))
        ));
    }

    #[test]
    fn edit_rejects_blank_name_and_wrong_value_type() {
        let mut c = make_contract();
        let agree = c.fields[1].id.clone();
        assert!(apply_edit(&mut c, &ContractEdit::new().rename(" ")).is_err());
        assert!(apply_edit(&mut c, &ContractEdit::new().set(&agree, "yes")).is_err());
        assert_eq!(c.name, "Acme NDA");
    }
}
