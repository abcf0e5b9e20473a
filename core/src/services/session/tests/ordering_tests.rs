//! Tests for overlapping session operations

use std::sync::Arc;
use std::time::Duration;

use hms_shared::SessionConfig;

use crate::domain::entities::Role;
use crate::domain::value_objects::{AuthFailureKind, LoginOutcome, SessionPhase};
use crate::errors::AuthError;
use crate::repositories::TokenStore;
use crate::services::session::SessionManager;

use super::mocks::*;

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

#[tokio::test(start_paused = true)]
async fn test_overlapping_checks_keep_the_newest_result() {
    let first = user(1, "admin", Role::Admin);
    let second = user(1, "admin", Role::Doctor);
    let client = Arc::new(
        MockAuthClient::new()
            .on_me_after(ms(100), Ok(first))
            .on_me_after(ms(10), Ok(second.clone())),
    );
    let store = Arc::new(RecordingTokenStore::with_session("tok-1", None));
    let manager = SessionManager::new(client.clone(), store.clone(), SessionConfig::default());

    tokio::join!(manager.check_auth(), manager.check_auth());

    let state = manager.state();
    assert_eq!(state.phase, SessionPhase::Authenticated);
    assert_eq!(state.user, Some(second.clone()));
    assert_eq!(store.read().await.user, Some(second));
    assert_eq!(client.me_call_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_overlapping_checks_in_settle_order() {
    let first = user(1, "admin", Role::Admin);
    let second = user(1, "admin", Role::Doctor);
    let client = Arc::new(
        MockAuthClient::new()
            .on_me_after(ms(10), Ok(first))
            .on_me_after(ms(100), Ok(second.clone())),
    );
    let store = Arc::new(RecordingTokenStore::with_session("tok-1", None));
    let manager = SessionManager::new(client, store, SessionConfig::default());

    tokio::join!(manager.check_auth(), manager.check_auth());

    assert_eq!(manager.state().user, Some(second));
}

#[tokio::test(start_paused = true)]
async fn test_slow_failed_check_does_not_undo_newer_login() {
    let client = Arc::new(
        MockAuthClient::new()
            .on_me_after(ms(100), Err(AuthError::Unauthorized))
            .on_login(Ok(token("tok-2", admin())))
            .on_me(Ok(admin())),
    );
    let store = Arc::new(RecordingTokenStore::with_session("tok-1", Some(admin())));
    let manager = SessionManager::new(client, store.clone(), SessionConfig::default());

    let (_, outcome) = tokio::join!(manager.check_auth(), async {
        tokio::time::sleep(ms(10)).await;
        manager.login("admin", "admin123").await
    });

    assert!(outcome.is_authenticated());
    let state = manager.state();
    assert!(state.is_authenticated());
    assert!(state.error.is_none());
    assert_eq!(store.read().await.token(), Some("tok-2"));
}

#[tokio::test(start_paused = true)]
async fn test_login_superseded_by_logout() {
    let client = Arc::new(MockAuthClient::new().on_login_after(ms(100), Ok(token("tok-1", admin()))));
    let store = Arc::new(RecordingTokenStore::new());
    let manager = SessionManager::new(client.clone(), store.clone(), SessionConfig::default());

    let (outcome, _) = tokio::join!(manager.login("admin", "admin123"), async {
        tokio::time::sleep(ms(10)).await;
        manager.logout().await
    });

    assert_eq!(outcome, LoginOutcome::Superseded);
    assert!(!manager.state().is_authenticated());
    assert!(!manager.state().is_loading());
    assert!(store.read().await.is_empty());
    assert_eq!(client.me_call_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_reset_discards_in_flight_check() {
    let client = Arc::new(MockAuthClient::new().on_me_after(ms(50), Ok(admin())));
    let store = Arc::new(RecordingTokenStore::with_session("tok-1", None));
    let manager = SessionManager::new(client, store.clone(), SessionConfig::default());

    tokio::join!(manager.check_auth(), async {
        tokio::time::sleep(ms(10)).await;
        manager.reset();
    });

    assert_eq!(manager.state().phase, SessionPhase::Unknown);
    assert_eq!(store.write_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_refresh_during_logout_does_not_restore_session() {
    // identity check settling before and after the logout request returns
    for me_delay in [ms(50), ms(200)] {
        let client = Arc::new(
            MockAuthClient::new()
                .slow_logout(ms(100))
                .on_me_after(me_delay, Ok(admin())),
        );
        let store = Arc::new(RecordingTokenStore::with_session("tok-1", Some(admin())));
        let manager = SessionManager::new(client.clone(), store.clone(), SessionConfig::default());

        tokio::join!(manager.logout(), async {
            tokio::time::sleep(ms(10)).await;
            manager.refresh_user().await
        });

        let state = manager.state();
        assert_eq!(state.phase, SessionPhase::Anonymous);
        assert!(state.user.is_none());
        assert!(store.read().await.is_empty());
        assert!(manager.access_token().await.is_none());
        assert_eq!(client.logout_call_count(), 1);
        assert_eq!(client.me_call_count(), 1);
    }
}

#[tokio::test(start_paused = true)]
async fn test_rejected_token_is_cleared_after_newer_failed_login() {
    for (identifier, secret) in [("admin", "wrong"), ("", "")] {
        let client = Arc::new(
            MockAuthClient::new()
                .on_me_after(ms(100), Err(AuthError::Unauthorized))
                .on_login(Err(AuthError::invalid_credentials())),
        );
        let store = Arc::new(RecordingTokenStore::with_session("expired", Some(admin())));
        let manager = SessionManager::new(client, store.clone(), SessionConfig::default());

        let (_, outcome) = tokio::join!(manager.check_auth(), async {
            tokio::time::sleep(ms(10)).await;
            manager.login(identifier, secret).await
        });

        assert_eq!(outcome.failure_kind(), Some(AuthFailureKind::InvalidCredentials));
        let LoginOutcome::Rejected { message, .. } = outcome else {
            panic!("expected a rejected login");
        };
        let state = manager.state();
        assert_eq!(state.phase, SessionPhase::Anonymous);
        assert_eq!(state.error(), Some(message.as_str()));
        assert!(store.read().await.is_empty());
    }
}

#[tokio::test(start_paused = true)]
async fn test_rejected_token_does_not_clear_newer_login() {
    let confirmed = admin();
    let client = Arc::new(
        MockAuthClient::new()
            .on_me_after(ms(100), Err(AuthError::Unauthorized))
            .on_login(Ok(token("tok-2", admin())))
            .on_me(Ok(confirmed.clone())),
    );
    let store = Arc::new(RecordingTokenStore::with_session("expired", None));
    let manager = SessionManager::new(client, store.clone(), SessionConfig::default());

    let (_, outcome) = tokio::join!(manager.check_auth(), async {
        tokio::time::sleep(ms(10)).await;
        manager.login("admin", "admin123").await
    });

    assert!(outcome.is_authenticated());
    assert!(manager.state().is_authenticated());
    let stored = store.read().await;
    assert_eq!(stored.token(), Some("tok-2"));
    assert_eq!(stored.user, Some(confirmed));
}
