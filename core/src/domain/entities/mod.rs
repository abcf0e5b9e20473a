//! Domain entities representing core business objects.

pub mod credentials;
pub mod token;
pub mod user;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use credentials::{Credentials, CREDENTIALS_REQUIRED};
pub use token::{Token, DEFAULT_TOKEN_TYPE};
pub use user::{Role, User};
