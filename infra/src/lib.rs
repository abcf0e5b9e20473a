//! # Infrastructure Layer
//!
//! Concrete adapters for the hospital management client's session core:
//!
//! - **HTTP**: reqwest implementation of the backend auth API
//! - **Storage**: file-backed token store that survives restarts
//! - **Telemetry**: tracing subscriber setup
//!
//! [`initialize`] wires these together with the core session manager from an
//! [`AppConfig`].

use std::sync::Arc;

use hms_core::repositories::{MemoryTokenStore, TokenStore};
use hms_core::services::{RouteGuard, SessionManager};
use hms_shared::{AppConfig, StorageBackend};

/// HTTP module - backend API clients
pub mod http;

/// Storage module - token store implementations
pub mod storage;

/// Telemetry module - tracing subscriber setup
pub mod telemetry;

pub use http::HttpAuthClient;
pub use storage::FileTokenStore;

/// Session manager as wired by [`initialize`]
pub type AppSessionManager = SessionManager<HttpAuthClient, dyn TokenStore>;

/// Everything the UI layer needs from the session core
#[derive(Clone)]
pub struct InfrastructureServices {
    /// Configuration the services were built from
    pub config: AppConfig,
    /// Shared session manager
    pub session: Arc<AppSessionManager>,
    /// Guard for protected screens
    pub guard: RouteGuard,
}

/// Build the session core from configuration and restore any stored session
///
/// The returned session has already run its startup identity check, so its
/// state is settled.
pub async fn initialize(config: AppConfig) -> Result<InfrastructureServices, InfrastructureError> {
    tracing::info!(environment = %config.environment, "Initializing session services...");

    let client = Arc::new(HttpAuthClient::new(config.api.clone())?);
    let store: Arc<dyn TokenStore> = match config.storage.backend {
        StorageBackend::Memory => Arc::new(MemoryTokenStore::new()),
        StorageBackend::File => Arc::new(FileTokenStore::open(&config.storage)?),
    };

    let session = Arc::new(SessionManager::new(client, store, config.session.clone()));
    let guard = RouteGuard::new(&config.session);

    session.check_auth().await;

    let state = session.state();
    tracing::info!(
        authenticated = state.is_authenticated(),
        backend = ?config.storage.backend,
        "Session services initialized"
    );

    Ok(InfrastructureServices {
        config,
        session,
        guard,
    })
}

/// Load `.env` files and configuration from the environment, install the
/// tracing subscriber, then [`initialize`]
pub async fn initialize_from_env() -> Result<InfrastructureServices, InfrastructureError> {
    let config = load_config();
    if let Err(e) = telemetry::init_tracing(&config.logging) {
        tracing::debug!(error = %e, "Keeping existing tracing subscriber");
    }
    initialize(config).await
}

/// Load configuration from environment
fn load_config() -> AppConfig {
    let environment = hms_shared::Environment::from_env();
    dotenvy::from_filename(environment.env_file()).ok();
    dotenvy::dotenv().ok(); // Load .env file if present

    AppConfig::from_env()
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Filesystem error while preparing storage
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP client construction error
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
