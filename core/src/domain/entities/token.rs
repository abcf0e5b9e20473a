//! Access token issued by the backend on a successful login.

use serde::{Deserialize, Serialize};

use super::user::User;

/// Token type assumed when the backend omits it
pub const DEFAULT_TOKEN_TYPE: &str = "bearer";

/// Login response payload
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Opaque access token used on subsequent requests
    pub access_token: String,

    /// Authorization scheme, normally "bearer"
    #[serde(default = "default_token_type")]
    pub token_type: String,

    /// Token lifetime in seconds
    #[serde(default)]
    pub expires_in: i64,

    /// Identity the token was issued for
    pub user: User,
}

fn default_token_type() -> String {
    DEFAULT_TOKEN_TYPE.to_string()
}

impl Token {
    pub fn new(access_token: impl Into<String>, expires_in: i64, user: User) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: default_token_type(),
            expires_in,
            user,
        }
    }

    /// Whether the backend actually handed out a usable token
    pub fn has_access_token(&self) -> bool {
        !self.access_token.trim().is_empty()
    }

    /// Value for the `Authorization` header
    pub fn authorization_header(&self) -> String {
        bearer(&self.access_token)
    }
}

/// Format a raw access token as a bearer credential
pub fn bearer(access_token: &str) -> String {
    format!("Bearer {}", access_token)
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Token")
            .field("access_token", &hms_shared::mask_token(&self.access_token))
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("user", &self.user.username)
            .finish()
    }
}
