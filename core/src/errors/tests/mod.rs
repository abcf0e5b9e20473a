//! Unit tests for domain error types

use hms_shared::validation::ValidationErrors;

use crate::domain::value_objects::AuthFailureKind;
use crate::errors::{AuthError, DomainError, StorageError};

#[test]
fn test_kind_folds_variants() {
    assert_eq!(AuthError::invalid_credentials().kind(), AuthFailureKind::InvalidCredentials);
    assert_eq!(AuthError::AccountInactive.kind(), AuthFailureKind::InvalidCredentials);
    assert_eq!(AuthError::Unauthorized.kind(), AuthFailureKind::Unauthorized);
    assert_eq!(AuthError::Network("timed out".into()).kind(), AuthFailureKind::Network);
    assert_eq!(
        AuthError::Server { status: 502, message: "Bad Gateway".into() }.kind(),
        AuthFailureKind::Unknown
    );
    assert_eq!(AuthError::MalformedResponse("eof".into()).kind(), AuthFailureKind::Unknown);
}

#[test]
fn test_user_messages() {
    assert_eq!(AuthError::invalid_credentials().user_message(), "Invalid username or password");
    assert_eq!(
        AuthError::InvalidCredentials { detail: Some("Incorrect username or password".into()) }.user_message(),
        "Incorrect username or password"
    );
    assert_eq!(AuthError::AccountInactive.user_message(), "This account has been deactivated");
    assert_eq!(
        AuthError::Unauthorized.user_message(),
        "Your session has expired. Please sign in again."
    );
    assert_eq!(
        AuthError::Network("connection refused".into()).user_message(),
        "Unable to reach the server. Please try again."
    );
    assert_eq!(AuthError::Unknown(String::new()).user_message(), "Authentication failed");
    assert_eq!(AuthError::Unknown("Invalid login response".into()).user_message(), "Invalid login response");
}

#[test]
fn test_error_codes() {
    assert_eq!(AuthError::invalid_credentials().error_code(), "INVALID_CREDENTIALS");
    assert_eq!(AuthError::AccountInactive.error_code(), "ACCOUNT_INACTIVE");
    assert_eq!(AuthError::Network(String::new()).error_code(), "NETWORK_ERROR");
}

#[test]
fn test_display() {
    assert_eq!(AuthError::invalid_credentials().to_string(), "Invalid credentials");
    assert_eq!(
        AuthError::InvalidCredentials { detail: Some("nope".into()) }.to_string(),
        "Invalid credentials: nope"
    );
}

#[test]
fn test_storage_error_bridges_into_auth_error() {
    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
    let err: AuthError = StorageError::from(io).into();

    assert_eq!(err.kind(), AuthFailureKind::Unknown);
    assert!(err.user_message().contains("read-only"));
}

#[test]
fn test_domain_error_bridges() {
    let mut errors = ValidationErrors::new();
    errors.add_error("username", "Username is required", "REQUIRED");
    let err = DomainError::from(errors);

    assert_eq!(err.kind(), AuthFailureKind::InvalidCredentials);
    assert_eq!(err.error_code(), "VALIDATION_ERROR");
    assert_eq!(err.to_string(), "Validation failed: username");

    let err = DomainError::from(AuthError::Unauthorized);
    assert_eq!(err.kind(), AuthFailureKind::Unauthorized);
}
