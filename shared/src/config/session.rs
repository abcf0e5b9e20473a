//! Session behaviour configuration

use serde::{Deserialize, Serialize};

/// Session manager and route guard settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Where unauthenticated users are sent
    #[serde(default = "default_login_path")]
    pub login_path: String,

    /// Confirm the identity against the backend after a successful login
    /// instead of trusting the user embedded in the token response
    #[serde(default = "default_true")]
    pub confirm_identity_after_login: bool,

    /// Expose the persisted user snapshot while the startup identity check
    /// is still in flight
    #[serde(default = "default_true")]
    pub optimistic_restore: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            login_path: default_login_path(),
            confirm_identity_after_login: true,
            optimistic_restore: true,
        }
    }
}

impl SessionConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(path) = std::env::var("HMS_LOGIN_PATH") {
            config.login_path = path;
        }
        config
    }
}

fn default_login_path() -> String {
    String::from("/login")
}

fn default_true() -> bool {
    true
}
