//! In-process token store

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::{Token, User};
use crate::errors::StorageError;

use super::r#trait::{StoredSession, TokenStore};

/// Token store backed by process memory
///
/// Nothing survives a restart. Clones share the same underlying session.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    session: Arc<RwLock<StoredSession>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds a session
    pub fn with_session(access_token: impl Into<String>, user: Option<User>) -> Self {
        Self {
            session: Arc::new(RwLock::new(StoredSession {
                access_token: Some(access_token.into()),
                user,
            })),
        }
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn save(&self, token: &Token) -> Result<(), StorageError> {
        let mut session = self.session.write().await;
        session.access_token = Some(token.access_token.clone());
        session.user = Some(token.user.clone());
        Ok(())
    }

    async fn save_user(&self, user: &User) -> Result<(), StorageError> {
        self.session.write().await.user = Some(user.clone());
        Ok(())
    }

    async fn read(&self) -> StoredSession {
        self.session.read().await.clone()
    }

    async fn clear(&self) -> Result<(), StorageError> {
        *self.session.write().await = StoredSession::default();
        Ok(())
    }
}
