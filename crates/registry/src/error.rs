use pactum_core::{CoreError, LifecycleViolation, ReferentialIntegrityViolation, ValidationError};
use pactum_storage::StorageError;

use crate::config::ConfigError;

/// Everything a workspace call can fail with.
///
/// `Display` is the message shown to the user.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl RegistryError {
    pub fn as_core(&self) -> Option<&CoreError> {
        match self {
            RegistryError::Core(e) => Some(e),
            _ => None,
        }
    }

    /// True for the recoverable kinds a user caused and can fix:
    /// validation, lifecycle and referential-integrity errors.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            RegistryError::Core(
                CoreError::Validation(_)
                    | CoreError::Lifecycle(_)
                    | CoreError::ReferentialIntegrity(_)
            )
        )
    }
}

impl From<ValidationError> for RegistryError {
    fn from(e: ValidationError) -> Self {
        RegistryError::Core(e.into())
    }
}

impl From<LifecycleViolation> for RegistryError {
    fn from(e: LifecycleViolation) -> Self {
        RegistryError::Core(e.into())
    }
}

impl From<ReferentialIntegrityViolation> for RegistryError {
    fn from(e: ReferentialIntegrityViolation) -> Self {
        RegistryError::Core(e.into())
    }
}
