use crate::error::StorageError;
use crate::key::StorageKey;

/// The storage trait for Pactum persistence backends.
///
/// A backend is a durable key-value store addressed by the two fixed
/// [`StorageKey`]s. Each key holds one serialized collection.
///
/// ## Semantics
///
/// - `load` returns `Ok(None)` for a key that has never been saved. It is
///   called once per key when a workspace opens.
/// - `save` replaces the whole document under `key`. It is never an
///   incremental append; after a successful `save`, `load` on the same key
///   returns exactly the saved payload.
/// - Keys are independent: saving one never changes the other.
///
/// Execution is synchronous and single-threaded, so no locking or
/// transaction handle is involved; the trait is object safe so the
/// configured backend can be chosen at runtime.
pub trait PactumStorage {
    /// Read the document stored under `key`.
    fn load(&self, key: StorageKey) -> Result<Option<String>, StorageError>;

    /// Replace the document stored under `key` with `payload`.
    fn save(&mut self, key: StorageKey, payload: &str) -> Result<(), StorageError>;

    /// Short backend name for logging.
    fn backend_name(&self) -> &'static str;
}

impl<S: PactumStorage + ?Sized> PactumStorage for Box<S> {
    fn load(&self, key: StorageKey) -> Result<Option<String>, StorageError> {
        (**self).load(key)
    }

    fn save(&mut self, key: StorageKey, payload: &str) -> Result<(), StorageError> {
        (**self).save(key, payload)
    }

    fn backend_name(&self) -> &'static str {
        (**self).backend_name()
    }
}
