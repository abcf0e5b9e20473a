//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `api` - Backend endpoint locations and request timeouts
//! - `environment` - Environment detection and logging configuration
//! - `session` - Session manager and route guard behaviour
//! - `storage` - Where and how the session token is persisted

pub mod api;
pub mod environment;
pub mod session;
pub mod storage;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use api::ApiConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use session::SessionConfig;
pub use storage::{StorageBackend, StorageConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Backend API configuration
    pub api: ApiConfig,

    /// Token storage configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Session behaviour configuration
    #[serde(default)]
    pub session: SessionConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            api: ApiConfig::default(),
            storage: StorageConfig::default(),
            session: SessionConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            api: ApiConfig::new("http://localhost:8000"),
            storage: StorageConfig::default(),
            session: SessionConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Development),
        }
    }

    /// Create configuration for production environment
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            api: ApiConfig::new("https://api.hms.local").with_timeout_secs(15),
            storage: StorageConfig::default(),
            session: SessionConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Production),
        }
    }

    /// Load configuration from environment
    ///
    /// Starts from the preset for the detected environment and applies the
    /// per-area `from_env` overrides on top.
    pub fn from_env() -> Self {
        let env = Environment::from_env();
        let mut config = match env {
            Environment::Development => Self::development(),
            Environment::Production => Self::production(),
            Environment::Staging => {
                let mut config = Self::development();
                config.environment = Environment::Staging;
                config.logging = LoggingConfig::for_environment(Environment::Staging);
                config
            }
        };

        config.api = config.api.merge_env();
        config.storage = StorageConfig::from_env();
        config.session = SessionConfig::from_env();
        if let Ok(level) = std::env::var("RUST_LOG") {
            config.logging.level = level;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_preset() {
        let config = AppConfig::development();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_production_preset() {
        let config = AppConfig::production();
        assert!(config.environment.is_production());
        assert_eq!(config.api.request_timeout_secs, 15);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let json = r#"{
            "environment": "staging",
            "api": { "base_url": "http://backend:8000" }
        }"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.environment, Environment::Staging);
        assert_eq!(config.api.login_path, "/auth/login");
        assert_eq!(config.storage.namespace, "hms");
        assert_eq!(config.session.login_path, "/login");
    }
}
