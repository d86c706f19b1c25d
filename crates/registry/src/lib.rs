//! pactum-registry: the stores behind the Pactum UI.
//!
//! [`Workspace`] is the object presentation code is handed. It owns a
//! [`BlueprintStore`], a [`ContractStore`] and a storage backend, and
//! every mutating call follows the same path:
//!
//! 1. validate the request (nothing changes on failure)
//! 2. apply it to a staged copy of the affected store
//! 3. save the whole staged collection under its storage key
//! 4. swap the staged copy in and notify subscribers
//!
//! The stores are usable on their own; they hold no storage handle and
//! never log.

pub mod blueprints;
pub mod config;
pub mod contracts;
pub mod error;
pub mod events;
pub mod logging;
pub mod view;
pub mod workspace;

pub use blueprints::{BlueprintStore, UNKNOWN_BLUEPRINT};
pub use config::{ConfigError, LoggingConfig, StorageBackend, StorageConfig, WorkspaceConfig};
pub use contracts::ContractStore;
pub use error::RegistryError;
pub use events::{ChangeEvent, SubscriptionId};
pub use view::ContractRow;
pub use workspace::Workspace;
