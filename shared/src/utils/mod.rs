//! Common utility functions

pub mod mask;
pub mod validation;

// Re-export commonly used utilities
pub use mask::mask_token;
pub use validation::*;
