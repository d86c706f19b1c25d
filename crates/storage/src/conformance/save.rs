use super::{load_str, make_contract_payload, TestResult};
use crate::{PactumStorage, StorageKey};

pub(super) fn run_save_tests<S, F>(factory: &F) -> Vec<TestResult>
where
    S: PactumStorage,
    F: Fn() -> S,
{
    let mut results = Vec::new();

    results.push(TestResult::from_result(
        "save",
        "save_replaces_whole_document",
        save_replaces_whole_document(factory),
    ));
    results.push(TestResult::from_result(
        "save",
        "save_shrinking_collection",
        save_shrinking_collection(factory),
    ));
    results.push(TestResult::from_result(
        "save",
        "save_empty_collection",
        save_empty_collection(factory),
    ));
    results.push(TestResult::from_result(
        "save",
        "save_large_collection",
        save_large_collection(factory),
    ));

    results
}

// ── Test implementations ──────────────────────────────────────────────────────

/// A second save replaces the first; nothing is appended.
fn save_replaces_whole_document<S, F>(factory: &F) -> Result<(), String>
where
    S: PactumStorage,
    F: Fn() -> S,
{
    let mut s = factory();
    s.save(StorageKey::Contracts, &make_contract_payload(1))
        .map_err(|e| e.to_string())?;
    let second = make_contract_payload(2);
    s.save(StorageKey::Contracts, &second)
        .map_err(|e| e.to_string())?;
    let loaded = load_str(&s, StorageKey::Contracts)?;
    if loaded.as_deref() != Some(second.as_str()) {
        return Err(format!("expected second payload, got {loaded:?}"));
    }
    Ok(())
}

/// Saving a shorter document leaves no trailing bytes of the longer one.
fn save_shrinking_collection<S, F>(factory: &F) -> Result<(), String>
where
    S: PactumStorage,
    F: Fn() -> S,
{
    let mut s = factory();
    s.save(StorageKey::Contracts, &make_contract_payload(10))
        .map_err(|e| e.to_string())?;
    let short = make_contract_payload(1);
    s.save(StorageKey::Contracts, &short)
        .map_err(|e| e.to_string())?;
    let loaded = load_str(&s, StorageKey::Contracts)?.unwrap_or_default();
    serde_json::from_str::<serde_json::Value>(&loaded)
        .map_err(|e| format!("shrunk document is not valid JSON: {e}"))?;
    if loaded != short {
        return Err(format!("expected {short}, got {loaded}"));
    }
    Ok(())
}

/// An empty collection is stored as present, not as missing.
fn save_empty_collection<S, F>(factory: &F) -> Result<(), String>
where
    S: PactumStorage,
    F: Fn() -> S,
{
    let mut s = factory();
    s.save(StorageKey::Blueprints, "[]")
        .map_err(|e| e.to_string())?;
    match load_str(&s, StorageKey::Blueprints)? {
        Some(p) if p == "[]" => Ok(()),
        other => Err(format!("expected \"[]\", got {other:?}")),
    }
}

fn save_large_collection<S, F>(factory: &F) -> Result<(), String>
where
    S: PactumStorage,
    F: Fn() -> S,
{
    let mut s = factory();
    let payload = make_contract_payload(2_000);
    s.save(StorageKey::Contracts, &payload)
        .map_err(|e| e.to_string())?;
    let loaded = load_str(&s, StorageKey::Contracts)?;
    if loaded.as_deref() != Some(payload.as_str()) {
        return Err(format!(
            "large payload mismatch: saved {} bytes, loaded {:?} bytes",
            payload.len(),
            loaded.map(|l| l.len())
        ));
    }
    Ok(())
}
