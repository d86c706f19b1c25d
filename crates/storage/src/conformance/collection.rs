use super::{make_contract_payload, TestResult};
use crate::{load_collection, save_collection, PactumStorage, StorageError, StorageKey};

pub(super) fn run_collection_tests<S, F>(factory: &F) -> Vec<TestResult>
where
    S: PactumStorage,
    F: Fn() -> S,
{
    vec![
        TestResult::from_result(
            "collection",
            "collection_round_trips",
            collection_round_trips(factory),
        ),
        TestResult::from_result(
            "collection",
            "missing_collection_is_empty",
            missing_collection_is_empty(factory),
        ),
        TestResult::from_result(
            "collection",
            "corrupt_document_is_reported",
            corrupt_document_is_reported(factory),
        ),
    ]
}

// ── Test implementations ──────────────────────────────────────────────────────

/// Records saved through the codec load back equal, in order.
fn collection_round_trips<S, F>(factory: &F) -> Result<(), String>
where
    S: PactumStorage,
    F: Fn() -> S,
{
    let mut s = factory();
    let records: Vec<serde_json::Value> =
        serde_json::from_str(&make_contract_payload(5)).map_err(|e| e.to_string())?;
    save_collection(&mut s, StorageKey::Contracts, &records).map_err(|e| e.to_string())?;
    let loaded: Vec<serde_json::Value> =
        load_collection(&s, StorageKey::Contracts).map_err(|e| e.to_string())?;
    if loaded != records {
        return Err(format!("expected {records:?}, got {loaded:?}"));
    }
    Ok(())
}

fn missing_collection_is_empty<S, F>(factory: &F) -> Result<(), String>
where
    S: PactumStorage,
    F: Fn() -> S,
{
    let s = factory();
    let loaded: Vec<serde_json::Value> =
        load_collection(&s, StorageKey::Blueprints).map_err(|e| e.to_string())?;
    if !loaded.is_empty() {
        return Err(format!("expected empty collection, got {} records", loaded.len()));
    }
    Ok(())
}

fn corrupt_document_is_reported<S, F>(factory: &F) -> Result<(), String>
where
    S: PactumStorage,
    F: Fn() -> S,
{
    let mut s = factory();
    s.save(StorageKey::Blueprints, "{\"truncated\": ")
        .map_err(|e| e.to_string())?;
    match load_collection::<serde_json::Value, _>(&s, StorageKey::Blueprints) {
        Err(StorageError::Corrupt { key, .. }) if key == StorageKey::Blueprints => Ok(()),
        Err(other) => Err(format!("expected Corrupt, got {other}")),
        Ok(records) => Err(format!("expected Corrupt, loaded {} records", records.len())),
    }
}
