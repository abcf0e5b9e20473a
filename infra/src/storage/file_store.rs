//! File-backed token store
//!
//! The file is a flat JSON object of string keys to string values, the same
//! shape a browser's local storage has. Two keys are used under the
//! configured namespace: `<ns>.access_token` holds the raw token and
//! `<ns>.user` holds the JSON-encoded user snapshot.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use hms_core::domain::entities::{Token, User};
use hms_core::errors::StorageError;
use hms_core::repositories::{StoredSession, TokenStore};
use hms_shared::StorageConfig;
use serde_json::{Map, Value};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::InfrastructureError;

type Entries = Map<String, Value>;

/// Token store persisting to a JSON file
pub struct FileTokenStore {
    path: PathBuf,
    token_key: String,
    user_key: String,
    /// Serializes read-modify-write cycles on the file
    lock: Mutex<()>,
}

impl FileTokenStore {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            path: config.path.clone(),
            token_key: config.token_key(),
            user_key: config.user_key(),
            lock: Mutex::new(()),
        }
    }

    /// Create the store and make sure its directory exists
    pub fn open(config: &StorageConfig) -> Result<Self, InfrastructureError> {
        if let Some(parent) = config.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        debug!(path = %config.path.display(), namespace = %config.namespace, "Opened file token store");
        Ok(Self::new(config))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all entries; a missing or unreadable file counts as empty
    async fn load(&self) -> Entries {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Entries::new(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read token store");
                return Entries::new();
            }
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(entries)) => entries,
            Ok(_) | Err(_) => {
                warn!(path = %self.path.display(), "Token store is corrupt, treating it as empty");
                Entries::new()
            }
        }
    }

    /// Write all entries through a temporary file and rename it into place
    async fn persist(&self, entries: &Entries) -> Result<(), StorageError> {
        if entries.is_empty() {
            return match tokio::fs::remove_file(&self.path).await {
                Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
                _ => Ok(()),
            };
        }

        let contents = serde_json::to_vec_pretty(entries)?;
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, contents).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    fn decode_user(&self, value: &Value) -> Option<User> {
        let decoded = match value {
            Value::String(raw) => serde_json::from_str(raw),
            other => serde_json::from_value(other.clone()),
        };
        match decoded {
            Ok(user) => Some(user),
            Err(e) => {
                warn!(key = %self.user_key, error = %e, "Ignoring malformed user snapshot");
                None
            }
        }
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn save(&self, token: &Token) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.load().await;
        entries.insert(
            self.token_key.clone(),
            Value::String(token.access_token.clone()),
        );
        entries.insert(
            self.user_key.clone(),
            Value::String(serde_json::to_string(&token.user)?),
        );
        self.persist(&entries).await
    }

    async fn save_user(&self, user: &User) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.load().await;
        entries.insert(self.user_key.clone(), Value::String(serde_json::to_string(user)?));
        self.persist(&entries).await
    }

    async fn read(&self) -> StoredSession {
        let _guard = self.lock.lock().await;
        let entries = self.load().await;

        let access_token = match entries.get(&self.token_key) {
            Some(Value::String(token)) => Some(token.clone()),
            Some(_) => {
                warn!(key = %self.token_key, "Ignoring non-string access token entry");
                None
            }
            None => None,
        };
        let user = entries.get(&self.user_key).and_then(|v| self.decode_user(v));

        StoredSession { access_token, user }
    }

    async fn clear(&self) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.load().await;
        let removed_token = entries.remove(&self.token_key).is_some();
        let removed_user = entries.remove(&self.user_key).is_some();
        if !removed_token && !removed_user {
            return Ok(());
        }
        self.persist(&entries).await
    }
}
