//! pactum-storage: durable key-value persistence for Pactum collections.
//!
//! The whole blueprint collection and the whole contract collection are
//! each stored as one JSON document under a fixed [`StorageKey`]. A
//! backend only has to load and replace those documents; typed access
//! goes through [`load_collection`] / [`save_collection`].

mod codec;
pub mod conformance;
mod error;
mod file;
mod key;
mod memory;
mod traits;

pub use codec::{load_collection, save_collection};
pub use error::StorageError;
pub use file::FileStorage;
pub use key::StorageKey;
pub use memory::MemoryStorage;
pub use traits::PactumStorage;
