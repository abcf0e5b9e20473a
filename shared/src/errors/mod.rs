//! Backend error body and error codes

use serde::{Deserialize, Serialize};

/// Error body returned by the backend on non-2xx responses
///
/// The backend answers failures with `{"detail": "..."}`; validation failures
/// carry a list of field errors in `detail` instead of a string, so the field
/// is kept as raw JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Error description
    #[serde(default)]
    pub detail: serde_json::Value,
}

impl ErrorDetail {
    /// Parse an error body, returning `None` when it isn't the expected shape
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }

    /// Human-readable message, if the detail is a plain string
    pub fn message(&self) -> Option<&str> {
        self.detail.as_str().filter(|s| !s.trim().is_empty())
    }
}

/// Error codes for the authentication failure taxonomy
pub mod error_codes {
    pub const INVALID_CREDENTIALS: &str = "INVALID_CREDENTIALS";
    pub const ACCOUNT_INACTIVE: &str = "ACCOUNT_INACTIVE";
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const NETWORK_ERROR: &str = "NETWORK_ERROR";
    pub const SERVER_ERROR: &str = "SERVER_ERROR";
    pub const MALFORMED_RESPONSE: &str = "MALFORMED_RESPONSE";
    pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const UNKNOWN: &str = "UNKNOWN";
}
