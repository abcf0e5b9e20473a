//! Contract for the backend authentication API

use async_trait::async_trait;

use crate::domain::entities::{Credentials, Token, User};
use crate::errors::AuthError;

/// Network collaborator used by the session manager
///
/// Implementations translate transport and HTTP failures into `AuthError`
/// variants; they never touch the token store.
#[async_trait]
pub trait AuthApiClient: Send + Sync {
    /// Exchange credentials for an access token
    ///
    /// Rejected credentials map to `AuthError::InvalidCredentials` (or
    /// `AccountInactive`), transport failures to `AuthError::Network`.
    async fn login(&self, credentials: &Credentials) -> Result<Token, AuthError>;

    /// Fetch the user the access token belongs to
    ///
    /// A token the backend no longer accepts maps to `AuthError::Unauthorized`.
    async fn current_user(&self, access_token: &str) -> Result<User, AuthError>;

    /// Tell the backend the token is no longer in use. Best effort.
    async fn logout(&self, access_token: &str) -> Result<(), AuthError>;
}
