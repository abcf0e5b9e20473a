//! Result of a login attempt as observed by the UI.

use serde::{Deserialize, Serialize};

use crate::domain::entities::User;

/// Coarse failure taxonomy surfaced to UI consumers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthFailureKind {
    /// Credentials were rejected or the account cannot sign in
    InvalidCredentials,
    /// A stored token is no longer accepted
    Unauthorized,
    /// The backend could not be reached
    Network,
    /// Anything else
    Unknown,
}

impl AuthFailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthFailureKind::InvalidCredentials => "invalid_credentials",
            AuthFailureKind::Unauthorized => "unauthorized",
            AuthFailureKind::Network => "network",
            AuthFailureKind::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for AuthFailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of `SessionManager::login`
///
/// Login never fails with an `Err`; every failure is described here and
/// mirrored into the session's `error` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// The user is signed in
    Authenticated(User),

    /// The attempt failed; the token store was left untouched
    Rejected {
        kind: AuthFailureKind,
        message: String,
    },

    /// A newer session operation started before this one settled, so its
    /// result was discarded
    Superseded,
}

impl LoginOutcome {
    pub fn rejected(kind: AuthFailureKind, message: impl Into<String>) -> Self {
        LoginOutcome::Rejected {
            kind,
            message: message.into(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, LoginOutcome::Authenticated(_))
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            LoginOutcome::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn failure_kind(&self) -> Option<AuthFailureKind> {
        match self {
            LoginOutcome::Rejected { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}
