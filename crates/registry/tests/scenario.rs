//! End-to-end walkthroughs of the workspace: the NDA lifecycle, the
//! blueprint delete guard and change notifications.

use std::cell::RefCell;
use std::rc::Rc;

use pactum_core::{
    BlueprintField, ContractEdit, ContractStatus, CoreError, FieldType, FieldValue,
    LifecycleViolation, ReferentialIntegrityViolation,
};
use pactum_registry::{ChangeEvent, RegistryError, Workspace};
use pactum_storage::MemoryStorage;

fn workspace() -> Workspace<MemoryStorage> {
    Workspace::load(MemoryStorage::new()).unwrap()
}

fn nda_fields() -> Vec<BlueprintField> {
    vec![
        BlueprintField::new("Signer Name", FieldType::Text).unwrap(),
        BlueprintField::new("Effective Date", FieldType::Date).unwrap(),
        BlueprintField::new("Signature", FieldType::Signature).unwrap(),
        BlueprintField::new("I Agree", FieldType::Checkbox).unwrap(),
    ]
}

#[test]
fn nda_walks_to_locked_and_freezes() {
    let mut ws = workspace();
    let bp = ws.create_blueprint("NDA", nda_fields()).unwrap();
    let contract = ws.create_contract(&bp.id, "Acme NDA").unwrap();
    assert_eq!(contract.status, ContractStatus::Created);
    assert_eq!(contract.fields.len(), 4);

    let signer = bp.fields[0].id.clone();
    let date = bp.fields[1].id.clone();
    let agree = bp.fields[3].id.clone();
    ws.update_contract(
        &contract.id,
        &ContractEdit::new()
            .set(&signer, "Jane Roe")
            .set(&date, "2024-03-01")
            .set(&agree, true),
    )
    .unwrap();

    let expected = [
        ContractStatus::Approved,
        ContractStatus::Sent,
        ContractStatus::Signed,
        ContractStatus::Locked,
    ];
    for status in expected {
        let t = ws.advance(&contract.id).unwrap().unwrap();
        assert_eq!(t.to, status);
    }
    assert_eq!(ws.advance(&contract.id).unwrap(), None);
    assert!(!ws.is_mutable(&contract.id).unwrap());

    let err = ws
        .update_contract(&contract.id, &ContractEdit::new().set(&signer, "Mallory"))
        .unwrap_err();
    assert!(matches!(
        err,
        RegistryError::Core(CoreError::Lifecycle(LifecycleViolation::Immutable { .. }))
    ));
    assert_eq!(
        ws.field_values(&contract.id).unwrap()[&signer],
        Some(FieldValue::from("Jane Roe"))
    );

    let err = ws.delete_blueprint(&bp.id).unwrap_err();
    assert_eq!(
        err.as_core(),
        Some(&CoreError::ReferentialIntegrity(
            ReferentialIntegrityViolation {
                blueprint_id: bp.id.clone(),
                contract_count: 1,
            }
        ))
    );
    assert!(err.is_user_facing());
    assert_eq!(ws.list_blueprints().len(), 1);
}

#[test]
fn revoke_reaches_every_non_terminal_status() {
    let mut ws = workspace();
    let bp = ws.create_blueprint("NDA", vec![]).unwrap();

    for steps in 0..=4 {
        let c = ws.create_contract(&bp.id, &format!("c{steps}")).unwrap();
        for _ in 0..steps {
            ws.advance(&c.id).unwrap();
        }
        let t = ws.revoke(&c.id).unwrap().unwrap();
        assert_eq!(t.to, ContractStatus::Revoked);
        assert!(!ws.is_mutable(&c.id).unwrap());
    }
    assert_eq!(ws.status_counts()[&ContractStatus::Revoked], 5);
    assert_eq!(ws.list_by_status(ContractStatus::Revoked).len(), 5);
}

#[test]
fn explicit_transition_must_follow_an_edge() {
    let mut ws = workspace();
    let bp = ws.create_blueprint("NDA", vec![]).unwrap();
    let c = ws.create_contract(&bp.id, "Acme").unwrap();

    let err = ws.transition_to(&c.id, ContractStatus::Signed).unwrap_err();
    assert!(matches!(
        err.as_core(),
        Some(CoreError::Lifecycle(LifecycleViolation::InvalidTransition { .. }))
    ));
    assert_eq!(ws.contract(&c.id).unwrap().status, ContractStatus::Created);

    let t = ws.transition_to(&c.id, ContractStatus::Approved).unwrap();
    assert_eq!((t.from, t.to), (ContractStatus::Created, ContractStatus::Approved));
}

#[test]
fn delete_guard_tracks_references() {
    let mut ws = workspace();
    let used = ws.create_blueprint("Lease", vec![]).unwrap();
    let unused = ws.create_blueprint("Loan", vec![]).unwrap();
    ws.create_contract(&used.id, "Flat 3").unwrap();
    ws.create_contract(&used.id, "Flat 4").unwrap();

    assert!(ws.has_contracts(&used.id));
    assert!(!ws.has_contracts(&unused.id));
    assert_eq!(ws.find_by_blueprint(&used.id).len(), 2);

    let err = ws.delete_blueprint(&used.id).unwrap_err();
    assert!(matches!(
        err.as_core(),
        Some(CoreError::ReferentialIntegrity(ReferentialIntegrityViolation {
            contract_count: 2,
            ..
        }))
    ));

    let removed = ws.delete_blueprint(&unused.id).unwrap();
    assert_eq!(removed.id, unused.id);
    let ids: Vec<&str> = ws.list_blueprints().iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, vec![used.id.as_str()]);
}

#[test]
fn blueprint_edits_leave_existing_contracts_alone() {
    let mut ws = workspace();
    let bp = ws.create_blueprint("NDA", nda_fields()).unwrap();
    let c = ws.create_contract(&bp.id, "Acme").unwrap();

    let mut edited = bp.clone();
    edited.rename("Mutual NDA");
    edited.fields.truncate(1);
    ws.update_blueprint(edited).unwrap();

    assert_eq!(ws.blueprint_name(&bp.id), "Mutual NDA");
    assert_eq!(ws.contract(&c.id).unwrap().fields.len(), 4);
    assert_eq!(ws.contract_rows()[0].blueprint_name, "Mutual NDA");

    let later = ws.create_contract(&bp.id, "Beta").unwrap();
    assert_eq!(later.fields.len(), 1);
}

#[test]
fn subscribers_see_committed_changes_only() {
    let mut ws = workspace();
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    let sub = ws.subscribe(move |e| sink.borrow_mut().push(e.clone()));

    let bp = ws.create_blueprint("NDA", nda_fields()).unwrap();
    let c = ws.create_contract(&bp.id, "Acme").unwrap();
    ws.advance(&c.id).unwrap();
    assert!(ws.delete_blueprint(&bp.id).is_err());
    assert!(ws.create_contract(&bp.id, "").is_err());

    {
        let seen = events.borrow();
        assert_eq!(seen.len(), 3);
        assert_eq!(
            seen[0],
            ChangeEvent::BlueprintAdded {
                blueprint_id: bp.id.clone()
            }
        );
        assert_eq!(
            seen[1],
            ChangeEvent::ContractCreated {
                contract_id: c.id.clone(),
                blueprint_id: bp.id.clone()
            }
        );
        assert!(matches!(
            &seen[2],
            ChangeEvent::ContractTransitioned(t) if t.to == ContractStatus::Approved
        ));
    }

    assert!(ws.unsubscribe(sub));
    ws.advance(&c.id).unwrap();
    assert_eq!(events.borrow().len(), 3);
}
