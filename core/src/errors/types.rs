//! Error types for authentication and token persistence
//!
//! `AuthError` is what the auth API client reports. Its variants are finer
//! than the taxonomy the UI sees; `kind()` folds them into an
//! `AuthFailureKind` and `user_message()` picks the text to display.

use hms_shared::error_codes;
use thiserror::Error;

use crate::domain::value_objects::AuthFailureKind;

/// Fallback message for failures without a better description
pub const GENERIC_FAILURE: &str = "Authentication failed";

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Login rejected; carries the backend's explanation when it sent one
    #[error("Invalid credentials{}", .detail.as_ref().map(|d| format!(": {}", d)).unwrap_or_default())]
    InvalidCredentials { detail: Option<String> },

    #[error("Account is inactive")]
    AccountInactive,

    /// The access token was not accepted
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("{0}")]
    Unknown(String),
}

impl AuthError {
    pub fn invalid_credentials() -> Self {
        AuthError::InvalidCredentials { detail: None }
    }

    /// Failure category surfaced to the UI
    pub fn kind(&self) -> AuthFailureKind {
        match self {
            AuthError::InvalidCredentials { .. } | AuthError::AccountInactive => {
                AuthFailureKind::InvalidCredentials
            }
            AuthError::Unauthorized => AuthFailureKind::Unauthorized,
            AuthError::Network(_) => AuthFailureKind::Network,
            AuthError::Server { .. }
            | AuthError::MalformedResponse(_)
            | AuthError::Storage(_)
            | AuthError::Unknown(_) => AuthFailureKind::Unknown,
        }
    }

    /// Message suitable for display next to the login form
    pub fn user_message(&self) -> String {
        match self {
            AuthError::InvalidCredentials { detail } => detail
                .as_deref()
                .filter(|d| !d.trim().is_empty())
                .unwrap_or("Invalid username or password")
                .to_string(),
            AuthError::AccountInactive => "This account has been deactivated".to_string(),
            AuthError::Unauthorized => "Your session has expired. Please sign in again.".to_string(),
            AuthError::Network(_) => "Unable to reach the server. Please try again.".to_string(),
            AuthError::Server { message, .. }
            | AuthError::MalformedResponse(message)
            | AuthError::Storage(message)
            | AuthError::Unknown(message) => {
                if message.trim().is_empty() {
                    GENERIC_FAILURE.to_string()
                } else {
                    message.clone()
                }
            }
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials { .. } => error_codes::INVALID_CREDENTIALS,
            AuthError::AccountInactive => error_codes::ACCOUNT_INACTIVE,
            AuthError::Unauthorized => error_codes::UNAUTHORIZED,
            AuthError::Network(_) => error_codes::NETWORK_ERROR,
            AuthError::Server { .. } => error_codes::SERVER_ERROR,
            AuthError::MalformedResponse(_) => error_codes::MALFORMED_RESPONSE,
            AuthError::Storage(_) => error_codes::STORAGE_ERROR,
            AuthError::Unknown(_) => error_codes::UNKNOWN,
        }
    }
}

/// Token persistence errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<StorageError> for AuthError {
    fn from(err: StorageError) -> Self {
        AuthError::Storage(err.to_string())
    }
}
