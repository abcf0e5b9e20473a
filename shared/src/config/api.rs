//! Backend API configuration

use serde::{Deserialize, Serialize};

/// Location of the backend and its authentication endpoints
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base URL of the backend (scheme, host and port)
    pub base_url: String,

    /// Credential exchange endpoint
    #[serde(default = "default_login_path")]
    pub login_path: String,

    /// Identity endpoint returning the current user
    #[serde(default = "default_me_path")]
    pub me_path: String,

    /// Logout endpoint
    #[serde(default = "default_logout_path")]
    pub logout_path: String,

    /// Timeout applied to every request in seconds
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new("http://localhost:8000")
    }
}

impl ApiConfig {
    /// Create a new API configuration with the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            login_path: default_login_path(),
            me_path: default_me_path(),
            logout_path: default_logout_path(),
            request_timeout_secs: default_timeout(),
        }
    }

    /// Set the request timeout
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::default().merge_env()
    }

    /// Apply environment overrides on top of this configuration
    pub fn merge_env(mut self) -> Self {
        if let Ok(url) = std::env::var("HMS_API_URL") {
            self.base_url = url;
        }
        if let Some(secs) = std::env::var("HMS_API_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.request_timeout_secs = secs;
        }
        self
    }

    /// Full URL of the credential exchange endpoint
    pub fn login_url(&self) -> String {
        self.join(&self.login_path)
    }

    /// Full URL of the identity endpoint
    pub fn me_url(&self) -> String {
        self.join(&self.me_path)
    }

    /// Full URL of the logout endpoint
    pub fn logout_url(&self) -> String {
        self.join(&self.logout_path)
    }

    fn join(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

fn default_login_path() -> String {
    String::from("/auth/login")
}

fn default_me_path() -> String {
    String::from("/auth/me")
}

fn default_logout_path() -> String {
    String::from("/auth/logout")
}

fn default_timeout() -> u64 {
    30
}
