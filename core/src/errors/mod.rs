//! Domain-specific error types and error handling.

mod types;

// Re-export all error types
pub use types::{AuthError, StorageError};

use hms_shared::validation::ValidationErrors;
use thiserror::Error;

use crate::domain::value_objects::AuthFailureKind;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation failed: {}", .0.fields().join(", "))]
    Validation(ValidationErrors),

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<ValidationErrors> for DomainError {
    fn from(errors: ValidationErrors) -> Self {
        DomainError::Validation(errors)
    }
}

impl DomainError {
    pub fn kind(&self) -> AuthFailureKind {
        match self {
            DomainError::Validation(_) => AuthFailureKind::InvalidCredentials,
            DomainError::Auth(e) => e.kind(),
            DomainError::Storage(_) => AuthFailureKind::Unknown,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            DomainError::Validation(_) => hms_shared::error_codes::VALIDATION_ERROR,
            DomainError::Auth(e) => e.error_code(),
            DomainError::Storage(_) => hms_shared::error_codes::STORAGE_ERROR,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests;
