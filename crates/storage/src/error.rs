use crate::key::StorageKey;

/// All errors that can be returned by a PactumStorage implementation.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading or writing the backing medium failed.
    #[error("storage I/O error on '{key}': {source}")]
    Io {
        key: StorageKey,
        #[source]
        source: std::io::Error,
    },

    /// The storage directory could not be created or opened.
    #[error("cannot open storage directory {}: {source}", path.display())]
    Open {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stored document under `key` could not be decoded.
    #[error("stored collection '{key}' is corrupt: {source}")]
    Corrupt {
        key: StorageKey,
        #[source]
        source: serde_json::Error,
    },

    /// A collection could not be encoded for storage.
    #[error("failed to encode collection '{key}': {source}")]
    Encode {
        key: StorageKey,
        #[source]
        source: serde_json::Error,
    },

    /// A backend-specific storage error (unavailable medium, quota, etc.).
    #[error("storage backend error: {0}")]
    Backend(String),
}
