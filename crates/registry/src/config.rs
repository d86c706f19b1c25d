//! Workspace configuration, read from TOML.
//!
//! # Example
//!
//! ```toml
//! [storage]
//! backend = "file"     # or "memory"
//! dir = ".pactum"
//!
//! [lifecycle]
//! revoke_locked = true
//!
//! [logging]
//! filter = "info"
//! ```
//!
//! Every section and key is optional; missing ones take the defaults shown.

use std::path::{Path, PathBuf};

use pactum_core::LifecyclePolicy;
use pactum_storage::{FileStorage, MemoryStorage, PactumStorage, StorageError};
use serde::{Deserialize, Serialize};

// ── Types ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    pub storage: StorageConfig,
    pub lifecycle: LifecyclePolicy,
    pub logging: LoggingConfig,
}

/// `[storage]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Directory holding one JSON document per storage key. Ignored by
    /// the memory backend.
    pub dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            backend: StorageBackend::File,
            dir: PathBuf::from(".pactum"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    File,
    Memory,
}

/// `[logging]` section. `PACTUM_LOG` overrides `filter` when set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            filter: "info".to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse {}: {source}", describe(path.as_deref()))]
    Parse {
        path: Option<PathBuf>,
        #[source]
        source: toml::de::Error,
    },
}

fn describe(path: Option<&Path>) -> String {
    match path {
        Some(p) => format!("'{}'", p.display()),
        None => "configuration".to_string(),
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

impl WorkspaceConfig {
    /// Read and parse the TOML file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: Some(path.to_path_buf()),
            source,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse { path: None, source })
    }

    /// Like [`WorkspaceConfig::load`], but a missing file yields the
    /// defaults. A file that exists and does not parse is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::Read { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Open the configured backend.
    pub fn open_storage(&self) -> Result<Box<dyn PactumStorage>, StorageError> {
        match self.storage.backend {
            StorageBackend::File => Ok(Box::new(FileStorage::open(&self.storage.dir)?)),
            StorageBackend::Memory => Ok(Box::new(MemoryStorage::new())),
        }
    }
}
