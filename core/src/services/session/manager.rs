//! Session manager implementation

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use hms_shared::{mask_token, SessionConfig};
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};

use crate::domain::entities::{Credentials, User, CREDENTIALS_REQUIRED};
use crate::domain::value_objects::{AuthFailureKind, LoginOutcome, SessionState};
use crate::errors::AuthError;
use crate::repositories::{StoredSession, TokenStore};
use crate::services::auth_client::AuthApiClient;

/// Message used when the backend answers a login without a token
const INVALID_LOGIN_RESPONSE: &str = "Invalid login response";

/// Owns the session state and orchestrates the auth client and token store
///
/// Every operation takes a ticket when it starts. Results are only applied,
/// to the published state and to the token store alike, while that ticket is
/// still the newest one, so the operation that started last always wins.
/// Two writes ignore the ticket: logout always clears the store, and a token
/// the backend rejected is removed if the store still holds it.
pub struct SessionManager<C, S>
where
    C: AuthApiClient + ?Sized,
    S: TokenStore + ?Sized,
{
    /// Backend auth API
    client: Arc<C>,
    /// Persistence for the access token and user snapshot
    store: Arc<S>,
    /// Behaviour switches
    config: SessionConfig,
    /// Published state
    state: watch::Sender<SessionState>,
    /// Ticket of the most recently started operation
    epoch: AtomicU64,
    /// Serializes store access so a stale write cannot land after a newer one
    store_lock: Mutex<()>,
}

impl<C, S> SessionManager<C, S>
where
    C: AuthApiClient + ?Sized,
    S: TokenStore + ?Sized,
{
    /// Create a session manager in the initial `Unknown` state
    ///
    /// Call [`check_auth`](Self::check_auth) once at startup to restore a
    /// persisted session.
    pub fn new(client: Arc<C>, store: Arc<S>, config: SessionConfig) -> Self {
        let (state, _) = watch::channel(SessionState::initial());
        Self {
            client,
            store,
            config,
            state,
            epoch: AtomicU64::new(0),
            store_lock: Mutex::new(()),
        }
    }

    /// Behaviour switches the manager was built with
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Snapshot of the current state
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Access token for authorizing other API calls, if a session is stored
    pub async fn access_token(&self) -> Option<String> {
        self.read_store().await.token().map(str::to_owned)
    }

    /// Restore the session from the token store and validate it
    ///
    /// Without a stored token the session settles as anonymous and no
    /// request is made. With one, the identity endpoint decides: success
    /// refreshes the stored user snapshot, any failure clears the store.
    pub async fn check_auth(&self) {
        self.validate_session("check_auth").await
    }

    /// Re-validate the stored token and pick up changes to the user record
    pub async fn refresh_user(&self) {
        self.validate_session("refresh_user").await
    }

    /// Sign in with a username and password
    ///
    /// Never returns an error: failures come back as
    /// [`LoginOutcome::Rejected`] and are mirrored into the state's `error`.
    /// The token store is only written once the backend has issued a token.
    pub async fn login(&self, identifier: &str, secret: &str) -> LoginOutcome {
        let ticket = self.begin();

        let credentials = match Credentials::new(identifier, secret) {
            Ok(credentials) => credentials,
            Err(err) => {
                debug!(error = %err, "Rejected login with blank credentials");
                return self.reject(
                    ticket,
                    AuthFailureKind::InvalidCredentials,
                    CREDENTIALS_REQUIRED.to_string(),
                );
            }
        };

        self.publish(ticket, SessionState::begin_login);
        info!(username = %credentials.identifier(), "Attempting login");

        let token = match self.client.login(&credentials).await {
            Ok(token) if token.has_access_token() => token,
            Ok(_) => {
                warn!(username = %credentials.identifier(), "Login response carried no access token");
                return self.reject_with(ticket, AuthError::Unknown(INVALID_LOGIN_RESPONSE.to_string()));
            }
            Err(err) => return self.reject_with(ticket, err),
        };
        drop(credentials);

        {
            let _guard = self.store_lock.lock().await;
            if !self.is_current(ticket) {
                debug!("Login superseded before the token was stored");
                return LoginOutcome::Superseded;
            }
            if let Err(err) = self.store.save(&token).await {
                return self.reject_with(ticket, err.into());
            }
        }
        debug!(token = %mask_token(&token.access_token), "Stored access token");

        let user = if self.config.confirm_identity_after_login {
            match self.client.current_user(&token.access_token).await {
                Ok(user) => {
                    self.store_user(ticket, &user).await;
                    user
                }
                Err(err) => {
                    warn!(error = %err, "Identity check after login failed");
                    self.discard_session(Some(&token.access_token)).await;
                    return self.reject_with(ticket, err);
                }
            }
        } else {
            token.user
        };

        if self.publish(ticket, |_| SessionState::authenticated(user.clone())) {
            info!(username = %user.username, role = %user.role, "Login successful");
            LoginOutcome::Authenticated(user)
        } else {
            debug!(username = %user.username, "Login superseded by a newer session operation");
            LoginOutcome::Superseded
        }
    }

    /// Sign out
    ///
    /// The backend is told on a best-effort basis; the local session is
    /// cleared whatever it answers. Checks and logins still in flight when
    /// the store is cleared are superseded, including ones started while the
    /// backend call was pending.
    pub async fn logout(&self) {
        self.begin();

        if let Some(access_token) = self.read_store().await.token() {
            if let Err(err) = self.client.logout(access_token).await {
                warn!(error = %err, "Logout request failed, clearing local session anyway");
            }
        } else {
            debug!("Logout without a stored token");
        }

        // Take the final ticket under the store lock so nothing newer can
        // read the token before it is gone.
        let _guard = self.store_lock.lock().await;
        let ticket = self.begin();
        if let Err(err) = self.store.clear().await {
            warn!(error = %err, "Failed to clear stored session");
        }
        if self.publish(ticket, |_| SessionState::anonymous(None)) {
            info!("Logged out");
        }
    }

    /// Dismiss the error from the last failed operation
    pub fn clear_error(&self) {
        self.state.send_if_modified(|state| {
            if state.error.is_none() {
                return false;
            }
            *state = state.without_error();
            true
        });
    }

    /// Return to the initial state
    ///
    /// In-flight operations are discarded. The token store is left alone.
    pub fn reset(&self) {
        self.begin();
        self.state.send_modify(|state| *state = SessionState::initial());
    }

    async fn validate_session(&self, operation: &'static str) {
        let ticket = self.begin();

        let stored = self.read_store().await;
        let Some(access_token) = stored.token() else {
            if stored.user.is_some() {
                debug!(operation, "Discarding user snapshot without a token");
                self.discard_session(None).await;
            } else {
                debug!(operation, "No stored session");
            }
            self.publish(ticket, |_| SessionState::anonymous(None));
            return;
        };

        let provisional = if self.config.optimistic_restore {
            stored.user.clone()
        } else {
            None
        };
        self.publish(ticket, |state| state.begin_check(provisional));
        debug!(operation, token = %mask_token(access_token), "Validating stored session");

        match self.client.current_user(access_token).await {
            Ok(user) => {
                self.store_user(ticket, &user).await;
                if self.publish(ticket, |_| SessionState::authenticated(user.clone())) {
                    info!(operation, username = %user.username, "Session validated");
                }
            }
            Err(err) => {
                warn!(operation, error = %err, "Stored session rejected, clearing it");
                self.discard_session(Some(access_token)).await;
                self.publish(ticket, |_| SessionState::anonymous(Some(err.user_message())));
            }
        }
    }

    /// Start an operation and return its ticket
    fn begin(&self) -> u64 {
        self.epoch.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.epoch.load(Ordering::SeqCst) == ticket
    }

    /// Apply a transition if `ticket` is still current
    ///
    /// Returns false when the operation was superseded. Receivers are only
    /// notified when the state actually changes.
    fn publish<F>(&self, ticket: u64, transition: F) -> bool
    where
        F: FnOnce(&SessionState) -> SessionState,
    {
        let mut applied = false;
        self.state.send_if_modified(|state| {
            if !self.is_current(ticket) {
                return false;
            }
            applied = true;
            let next = transition(state);
            if *state == next {
                return false;
            }
            *state = next;
            true
        });
        applied
    }

    fn reject(&self, ticket: u64, kind: AuthFailureKind, message: String) -> LoginOutcome {
        if self.publish(ticket, |_| SessionState::anonymous(Some(message.clone()))) {
            LoginOutcome::Rejected { kind, message }
        } else {
            LoginOutcome::Superseded
        }
    }

    fn reject_with(&self, ticket: u64, err: AuthError) -> LoginOutcome {
        warn!(error = %err, code = err.error_code(), "Login failed");
        self.reject(ticket, err.kind(), err.user_message())
    }

    async fn read_store(&self) -> StoredSession {
        let _guard = self.store_lock.lock().await;
        self.store.read().await
    }

    async fn store_user(&self, ticket: u64, user: &User) {
        let _guard = self.store_lock.lock().await;
        if !self.is_current(ticket) {
            return;
        }
        if let Err(err) = self.store.save_user(user).await {
            warn!(error = %err, "Failed to refresh stored user snapshot");
        }
    }

    /// Clear the store if it still holds `expected` as its access token
    ///
    /// A rejected token is removed even when a newer operation has started,
    /// unless that operation already replaced it.
    async fn discard_session(&self, expected: Option<&str>) {
        let _guard = self.store_lock.lock().await;
        if self.store.read().await.token() != expected {
            debug!("Stored session changed, leaving it in place");
            return;
        }
        if let Err(err) = self.store.clear().await {
            warn!(error = %err, "Failed to clear stored session");
        }
    }
}
