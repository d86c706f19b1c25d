use super::{load_str, make_blueprint_payload, make_contract_payload, TestResult};
use crate::{PactumStorage, StorageKey};

pub(super) fn run_isolation_tests<S, F>(factory: &F) -> Vec<TestResult>
where
    S: PactumStorage,
    F: Fn() -> S,
{
    vec![
        TestResult::from_result(
            "isolation",
            "saving_one_key_leaves_other_absent",
            saving_one_key_leaves_other_absent(factory),
        ),
        TestResult::from_result(
            "isolation",
            "keys_hold_independent_documents",
            keys_hold_independent_documents(factory),
        ),
        TestResult::from_result(
            "isolation",
            "fresh_instances_are_empty",
            fresh_instances_are_empty(factory),
        ),
    ]
}

// ── Test implementations ──────────────────────────────────────────────────────

fn saving_one_key_leaves_other_absent<S, F>(factory: &F) -> Result<(), String>
where
    S: PactumStorage,
    F: Fn() -> S,
{
    let mut s = factory();
    s.save(StorageKey::Blueprints, &make_blueprint_payload(1))
        .map_err(|e| e.to_string())?;
    if let Some(p) = load_str(&s, StorageKey::Contracts)? {
        return Err(format!("contracts key gained a document: {p}"));
    }
    Ok(())
}

fn keys_hold_independent_documents<S, F>(factory: &F) -> Result<(), String>
where
    S: PactumStorage,
    F: Fn() -> S,
{
    let mut s = factory();
    let blueprints = make_blueprint_payload(2);
    let contracts = make_contract_payload(3);
    s.save(StorageKey::Blueprints, &blueprints)
        .map_err(|e| e.to_string())?;
    s.save(StorageKey::Contracts, &contracts)
        .map_err(|e| e.to_string())?;
    s.save(StorageKey::Contracts, "[]")
        .map_err(|e| e.to_string())?;

    let loaded = load_str(&s, StorageKey::Blueprints)?;
    if loaded.as_deref() != Some(blueprints.as_str()) {
        return Err(format!("blueprints changed after contracts save: {loaded:?}"));
    }
    Ok(())
}

/// Each factory call yields a backend that does not share state with
/// earlier instances.
fn fresh_instances_are_empty<S, F>(factory: &F) -> Result<(), String>
where
    S: PactumStorage,
    F: Fn() -> S,
{
    let mut first = factory();
    first
        .save(StorageKey::Contracts, &make_contract_payload(1))
        .map_err(|e| e.to_string())?;
    let second = factory();
    if let Some(p) = load_str(&second, StorageKey::Contracts)? {
        return Err(format!("new instance saw earlier document: {p}"));
    }
    Ok(())
}
