//! Token storage configuration module

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Storage backend for the persisted session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process memory only, lost on restart
    Memory,
    /// JSON key/value file on disk
    File,
}

impl std::str::FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "mem" => Ok(StorageBackend::Memory),
            "file" | "disk" => Ok(StorageBackend::File),
            _ => Err(format!("Invalid storage backend: {}", s)),
        }
    }
}

/// Where the access token and user snapshot are persisted
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Storage backend
    #[serde(default = "default_backend")]
    pub backend: StorageBackend,

    /// Application namespace prefixed to every persisted key
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// File path used by the file backend
    #[serde(default = "default_path")]
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            namespace: default_namespace(),
            path: default_path(),
        }
    }
}

impl StorageConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(backend) = std::env::var("HMS_STORAGE_BACKEND")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.backend = backend;
        }
        if let Ok(namespace) = std::env::var("HMS_STORAGE_NAMESPACE") {
            config.namespace = namespace;
        }
        if let Ok(path) = std::env::var("HMS_STORAGE_PATH") {
            config.path = PathBuf::from(path);
        }
        config
    }

    /// Create an in-memory configuration
    pub fn memory() -> Self {
        Self {
            backend: StorageBackend::Memory,
            ..Default::default()
        }
    }

    /// Create a file-backed configuration at the given path
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            backend: StorageBackend::File,
            path: path.into(),
            ..Default::default()
        }
    }

    /// Key holding the access token
    pub fn token_key(&self) -> String {
        format!("{}.access_token", self.namespace)
    }

    /// Key holding the serialized user snapshot
    pub fn user_key(&self) -> String {
        format!("{}.user", self.namespace)
    }
}

fn default_backend() -> StorageBackend {
    StorageBackend::File
}

fn default_namespace() -> String {
    String::from("hms")
}

fn default_path() -> PathBuf {
    PathBuf::from(".hms/session.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_namespaced() {
        let mut config = StorageConfig::default();
        assert_eq!(config.token_key(), "hms.access_token");
        assert_eq!(config.user_key(), "hms.user");

        config.namespace = "ward7".to_string();
        assert_eq!(config.token_key(), "ward7.access_token");
    }

    #[test]
    fn test_backend_from_str() {
        assert_eq!("memory".parse::<StorageBackend>().unwrap(), StorageBackend::Memory);
        assert_eq!("FILE".parse::<StorageBackend>().unwrap(), StorageBackend::File);
        assert!("redis".parse::<StorageBackend>().is_err());
    }
}
