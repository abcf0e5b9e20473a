//! Route guard deciding what a protected screen should render

use hms_shared::SessionConfig;

use crate::domain::entities::Role;
use crate::domain::value_objects::SessionState;

/// What a protected route should do for the current session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// The session is still settling; render a placeholder
    Pending,
    /// Nobody is signed in; navigate to the login screen
    Redirect { to: String },
    /// Render the protected content
    Allow,
    /// Signed in, but without a role this route requires
    Forbidden,
}

/// Redirect policy for protected screens
#[derive(Debug, Clone)]
pub struct RouteGuard {
    login_path: String,
    required_roles: Vec<Role>,
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self::new(&SessionConfig::default())
    }
}

impl RouteGuard {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            login_path: config.login_path.clone(),
            required_roles: Vec::new(),
        }
    }

    /// Restrict the route to users holding at least one of `roles`
    pub fn requiring(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.required_roles = roles.into_iter().collect();
        self
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Decide for the given state
    ///
    /// A loading session never redirects, so a slow startup check cannot
    /// bounce a signed-in user to the login screen.
    pub fn decide(&self, state: &SessionState) -> GuardDecision {
        if state.is_loading() {
            return GuardDecision::Pending;
        }
        match state.user() {
            None => GuardDecision::Redirect {
                to: self.login_path.clone(),
            },
            Some(user) if user.has_any_role(&self.required_roles) => GuardDecision::Allow,
            Some(_) => GuardDecision::Forbidden,
        }
    }
}
