//! Login credentials submitted by the user.

use hms_shared::validation::{validators, Validate, ValidationErrors};

use crate::errors::DomainResult;

/// Message shown when a credential field is left blank
pub const CREDENTIALS_REQUIRED: &str = "Username and password are required";

/// Identifier and secret for a single login attempt
///
/// Credentials are transient: they are handed to the auth client and
/// dropped. The secret never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    identifier: String,
    secret: String,
}

impl Credentials {
    /// Build credentials, trimming the identifier and rejecting blank fields
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> DomainResult<Self> {
        let credentials = Self {
            identifier: identifier.into().trim().to_string(),
            secret: secret.into(),
        };
        credentials.validate()?;
        Ok(credentials)
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl Validate for Credentials {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if !validators::not_empty(&self.identifier) {
            errors.add_error("username", "Username is required", "REQUIRED");
        }
        if self.secret.is_empty() {
            errors.add_error("password", "Password is required", "REQUIRED");
        }
        errors.into_result()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}
