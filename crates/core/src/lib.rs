//! pactum-core: Pactum data model and contract lifecycle engine.
//!
//! Blueprints are reusable templates (named, ordered sets of typed
//! fields). Contracts are instances created from a blueprint: they carry
//! a snapshot of the blueprint's fields, the values filled into them, and
//! a lifecycle status.
//!
//! # Public API
//!
//! - [`Blueprint`], [`BlueprintField`], [`FieldType`], [`FieldPosition`]
//! - [`Contract`], [`ContractField`], [`FieldValue`], [`ContractStatus`]
//! - [`lifecycle`] -- the status state machine and mutability rules
//! - [`CoreError`] and the three user-facing error kinds
//!
//! Nothing in this crate performs I/O; persistence lives in
//! `pactum-storage` and the stores in `pactum-registry`.

pub mod blueprint;
pub mod contract;
pub mod error;
pub mod field;
pub mod id;
pub mod lifecycle;
pub mod timestamp;

// ── Convenience re-exports: key types ────────────────────────────────

pub use blueprint::Blueprint;
pub use contract::{Contract, ContractEdit, ContractStatus};
pub use error::{
    CoreError, LifecycleViolation, RecordKind, ReferentialIntegrityViolation, ValidationError,
};
pub use field::{BlueprintField, ContractField, FieldPosition, FieldType, FieldValue};
pub use lifecycle::{LifecyclePolicy, Transition};
pub use timestamp::Timestamp;
