//! # HMS Core
//!
//! Core domain layer for the hospital management client.
//! This crate contains the authentication domain entities, the session
//! state machine, the storage and API contracts it depends on, and the
//! route guard policy consumed by the UI.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod errors;

// Re-export commonly used types for convenience
pub use domain::*;
pub use services::*;
pub use repositories::*;
pub use errors::*;
