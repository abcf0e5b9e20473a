//! Business services containing domain logic and use cases.

pub mod auth_client;
pub mod guard;
pub mod session;

// Re-export commonly used types
pub use auth_client::AuthApiClient;
pub use guard::{GuardDecision, RouteGuard};
pub use session::SessionManager;
