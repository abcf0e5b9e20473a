//! Authentication session management
//!
//! The [`SessionManager`] is the single owner of the session state. It is
//! constructed once at application start, shared behind an `Arc`, and is the
//! only component that writes to the token store.

mod manager;

#[cfg(test)]
mod tests;

pub use manager::SessionManager;
