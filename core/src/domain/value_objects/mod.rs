//! Value objects representing immutable domain concepts.

pub mod login_outcome;
pub mod session_state;

// Re-export commonly used types
pub use login_outcome::{AuthFailureKind, LoginOutcome};
pub use session_state::{SessionPhase, SessionState};
