use super::{load_str, make_contract_payload, TestResult};
use crate::{PactumStorage, StorageKey};

pub(super) fn run_load_tests<S, F>(factory: &F) -> Vec<TestResult>
where
    S: PactumStorage,
    F: Fn() -> S,
{
    let mut results = Vec::new();

    results.push(TestResult::from_result(
        "load",
        "missing_key_loads_none",
        missing_key_loads_none(factory),
    ));
    results.push(TestResult::from_result(
        "load",
        "saved_payload_loads_verbatim",
        saved_payload_loads_verbatim(factory),
    ));
    results.push(TestResult::from_result(
        "load",
        "load_is_repeatable",
        load_is_repeatable(factory),
    ));

    results
}

// ── Test implementations ──────────────────────────────────────────────────────

/// A fresh backend has nothing under either key.
fn missing_key_loads_none<S, F>(factory: &F) -> Result<(), String>
where
    S: PactumStorage,
    F: Fn() -> S,
{
    let s = factory();
    for key in StorageKey::ALL {
        if let Some(payload) = load_str(&s, key)? {
            return Err(format!("expected nothing under {key}, got {payload:?}"));
        }
    }
    Ok(())
}

/// What was saved is exactly what loads.
fn saved_payload_loads_verbatim<S, F>(factory: &F) -> Result<(), String>
where
    S: PactumStorage,
    F: Fn() -> S,
{
    let mut s = factory();
    let payload = make_contract_payload(3);
    s.save(StorageKey::Contracts, &payload)
        .map_err(|e| e.to_string())?;
    match load_str(&s, StorageKey::Contracts)? {
        Some(loaded) if loaded == payload => Ok(()),
        Some(loaded) => Err(format!("payload changed: {loaded}")),
        None => Err("saved payload not found".to_string()),
    }
}

/// Loading does not consume or alter the document.
fn load_is_repeatable<S, F>(factory: &F) -> Result<(), String>
where
    S: PactumStorage,
    F: Fn() -> S,
{
    let mut s = factory();
    let payload = make_contract_payload(1);
    s.save(StorageKey::Contracts, &payload)
        .map_err(|e| e.to_string())?;
    let first = load_str(&s, StorageKey::Contracts)?;
    let second = load_str(&s, StorageKey::Contracts)?;
    if first != second || first.as_deref() != Some(payload.as_str()) {
        return Err(format!("loads differ: {first:?} vs {second:?}"));
    }
    Ok(())
}
