//! Token store trait defining the interface for session persistence.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Token, User};
use crate::errors::StorageError;

/// What survived from the previous session
///
/// Both halves are independent: a store may hold a token whose user
/// snapshot failed to decode, in which case `user` is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub access_token: Option<String>,
    pub user: Option<User>,
}

impl StoredSession {
    pub fn is_empty(&self) -> bool {
        self.access_token.is_none() && self.user.is_none()
    }

    /// Access token, ignoring blank values
    pub fn token(&self) -> Option<&str> {
        self.access_token.as_deref().filter(|t| !t.trim().is_empty())
    }
}

/// Persistent store for the access token and the last-known user
///
/// The session manager is the only writer. Implementations must survive
/// process restarts unless they are explicitly ephemeral.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Persist the access token together with the user it was issued for
    ///
    /// Overwrites whatever was stored before.
    async fn save(&self, token: &Token) -> Result<(), StorageError>;

    /// Replace the user snapshot, leaving the access token as is
    async fn save_user(&self, user: &User) -> Result<(), StorageError>;

    /// Read the stored session
    ///
    /// Never fails: missing or undecodable entries come back as `None`.
    async fn read(&self) -> StoredSession;

    /// Remove both entries. Clearing an empty store is a no-op.
    async fn clear(&self) -> Result<(), StorageError>;
}
