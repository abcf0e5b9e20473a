//! Backend auth API client over HTTP
//!
//! Talks to the hospital backend's `/auth` endpoints:
//!
//! - `POST /auth/login` with form fields `username` and `password`
//! - `GET /auth/me` with a bearer token
//! - `POST /auth/logout` with a bearer token
//!
//! Failure bodies look like `{"detail": "..."}`; the detail is surfaced as the
//! error message when it is a plain string.

use std::time::Duration;

use async_trait::async_trait;
use hms_core::domain::entities::{token::bearer, Credentials, Token, User};
use hms_core::errors::AuthError;
use hms_core::services::AuthApiClient;
use hms_shared::{mask_token, ApiConfig, ErrorDetail};
use reqwest::{header::AUTHORIZATION, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::InfrastructureError;

/// Auth API client backed by reqwest
#[derive(Clone)]
pub struct HttpAuthClient {
    client: reqwest::Client,
    config: ApiConfig,
}

impl HttpAuthClient {
    /// Create a client for the given backend
    ///
    /// The request timeout from `config` applies to every call; a timed out
    /// request surfaces as `AuthError::Network`.
    pub fn new(config: ApiConfig) -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        info!(
            base_url = %config.base_url,
            timeout_secs = config.request_timeout_secs,
            "HTTP auth client initialized"
        );

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }
}

#[async_trait]
impl AuthApiClient for HttpAuthClient {
    #[tracing::instrument(skip(self, credentials), fields(username = %credentials.identifier()))]
    async fn login(&self, credentials: &Credentials) -> Result<Token, AuthError> {
        let url = self.config.login_url();
        debug!(url = %url, "Sending login request");

        let response = self
            .client
            .post(&url)
            .form(&[
                ("username", credentials.identifier()),
                ("password", credentials.secret()),
            ])
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if status.is_success() {
            let token: Token = decode(response).await?;
            debug!(token = %mask_token(&token.access_token), expires_in = token.expires_in, "Login accepted");
            return Ok(token);
        }

        let detail = error_detail(response).await;
        warn!(status = status.as_u16(), detail = ?detail, "Login rejected");
        Err(login_failure(status, detail))
    }

    async fn current_user(&self, access_token: &str) -> Result<User, AuthError> {
        let url = self.config.me_url();
        debug!(url = %url, token = %mask_token(access_token), "Fetching current user");

        let response = self
            .client
            .get(&url)
            .header(AUTHORIZATION, bearer(access_token))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if status.is_success() {
            return decode(response).await;
        }

        let detail = error_detail(response).await;
        debug!(status = status.as_u16(), detail = ?detail, "Identity check failed");
        Err(session_failure(status, detail))
    }

    async fn logout(&self, access_token: &str) -> Result<(), AuthError> {
        let url = self.config.logout_url();
        debug!(url = %url, token = %mask_token(access_token), "Sending logout request");

        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, bearer(access_token))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let detail = error_detail(response).await;
        Err(session_failure(status, detail))
    }
}

fn transport_error(err: reqwest::Error) -> AuthError {
    if err.is_timeout() {
        AuthError::Network(format!("request timed out: {}", err))
    } else {
        AuthError::Network(err.to_string())
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, AuthError> {
    let body = response.text().await.map_err(transport_error)?;
    serde_json::from_str(&body).map_err(|e| AuthError::MalformedResponse(e.to_string()))
}

/// Message from an error body, if the backend sent a readable one
async fn error_detail(response: Response) -> Option<String> {
    let body = response.text().await.ok()?;
    ErrorDetail::parse(&body).and_then(|d| d.message().map(str::to_owned))
}

fn login_failure(status: StatusCode, detail: Option<String>) -> AuthError {
    match status {
        StatusCode::BAD_REQUEST | StatusCode::FORBIDDEN if is_inactive(detail.as_deref()) => {
            AuthError::AccountInactive
        }
        StatusCode::UNAUTHORIZED
        | StatusCode::BAD_REQUEST
        | StatusCode::FORBIDDEN
        | StatusCode::UNPROCESSABLE_ENTITY => AuthError::InvalidCredentials { detail },
        _ => status_failure(status, detail),
    }
}

fn session_failure(status: StatusCode, detail: Option<String>) -> AuthError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AuthError::Unauthorized,
        _ => status_failure(status, detail),
    }
}

fn status_failure(status: StatusCode, detail: Option<String>) -> AuthError {
    let message = detail.unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("Unexpected response")
            .to_string()
    });
    if status.is_server_error() {
        AuthError::Server {
            status: status.as_u16(),
            message,
        }
    } else {
        AuthError::Unknown(message)
    }
}

fn is_inactive(detail: Option<&str>) -> bool {
    detail
        .map(|d| d.to_ascii_lowercase().contains("inactive"))
        .unwrap_or(false)
}
