use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StorageError;
use crate::key::StorageKey;
use crate::traits::PactumStorage;

/// Load and decode the collection under `key`.
///
/// A key that was never saved yields an empty collection. A document
/// that does not decode is reported as [`StorageError::Corrupt`] instead
/// of being silently replaced.
pub fn load_collection<T, S>(storage: &S, key: StorageKey) -> Result<Vec<T>, StorageError>
where
    T: DeserializeOwned,
    S: PactumStorage + ?Sized,
{
    let Some(payload) = storage.load(key)? else {
        tracing::debug!(key = %key, "no stored collection, starting empty");
        return Ok(Vec::new());
    };
    let records: Vec<T> =
        serde_json::from_str(&payload).map_err(|source| StorageError::Corrupt { key, source })?;
    tracing::debug!(key = %key, records = records.len(), "loaded collection");
    Ok(records)
}

/// Encode `records` and replace the collection under `key`.
pub fn save_collection<T, S>(storage: &mut S, key: StorageKey, records: &[T]) -> Result<(), StorageError>
where
    T: Serialize,
    S: PactumStorage + ?Sized,
{
    let payload =
        serde_json::to_string(records).map_err(|source| StorageError::Encode { key, source })?;
    storage.save(key, &payload)?;
    tracing::debug!(
        key = %key,
        records = records.len(),
        backend = storage.backend_name(),
        "saved collection"
    );
    Ok(())
}
