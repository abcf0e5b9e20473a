//! HTTP clients for the hospital backend

pub mod auth_client;

pub use auth_client::HttpAuthClient;
