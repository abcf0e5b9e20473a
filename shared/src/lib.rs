//! Shared utilities and common types for the hospital management client
//!
//! This crate provides common functionality used across all workspace crates:
//! - Configuration types
//! - Backend error body and error codes
//! - Utility functions (token masking, credential checks)

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    ApiConfig, AppConfig, Environment, LogFormat, LoggingConfig, SessionConfig, StorageBackend,
    StorageConfig,
};
pub use errors::{error_codes, ErrorDetail};
pub use utils::{mask_token, validation};
