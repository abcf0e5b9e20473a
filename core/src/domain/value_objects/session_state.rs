//! Observable session state.
//!
//! `SessionState` is a plain value: the session manager computes the next
//! state with the transition methods below and publishes it whole, so
//! observers never see a half-applied update.

use serde::Serialize;

use crate::domain::entities::User;

/// Lifecycle phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// Nothing has been checked yet
    Unknown,
    /// An identity check or login is in flight
    Checking,
    /// A validated user is signed in
    Authenticated,
    /// Settled with nobody signed in
    Anonymous,
}

/// Snapshot of the session as seen by UI consumers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionState {
    pub phase: SessionPhase,

    /// Current user; `None` whenever the session is not authenticated
    pub user: Option<User>,

    /// Human-readable message from the last failed operation
    pub error: Option<String>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::initial()
    }
}

impl SessionState {
    /// State at application start, before any check has run
    pub fn initial() -> Self {
        Self {
            phase: SessionPhase::Unknown,
            user: None,
            error: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, SessionPhase::Unknown | SessionPhase::Checking)
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Enter `Checking`, optionally exposing a provisional user
    ///
    /// The error from a previous attempt is cleared.
    pub fn begin_check(&self, provisional: Option<User>) -> Self {
        Self {
            phase: SessionPhase::Checking,
            user: provisional,
            error: None,
        }
    }

    /// Enter `Checking` for a login, keeping whoever is currently signed in
    pub fn begin_login(&self) -> Self {
        Self {
            phase: SessionPhase::Checking,
            user: self.user.clone(),
            error: None,
        }
    }

    pub fn authenticated(user: User) -> Self {
        Self {
            phase: SessionPhase::Authenticated,
            user: Some(user),
            error: None,
        }
    }

    pub fn anonymous(error: Option<String>) -> Self {
        Self {
            phase: SessionPhase::Anonymous,
            user: None,
            error,
        }
    }

    pub fn without_error(&self) -> Self {
        Self {
            error: None,
            ..self.clone()
        }
    }
}
