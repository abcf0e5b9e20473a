//! Tests for the in-memory token store

use crate::domain::entities::{Role, Token, User};
use crate::repositories::token_store::{MemoryTokenStore, StoredSession, TokenStore};

fn admin() -> User {
    User::new(1, "admin", "admin@hospital.local", Role::Admin)
}

#[tokio::test]
async fn test_empty_store_reads_nothing() {
    let store = MemoryTokenStore::new();

    let session = store.read().await;
    assert!(session.is_empty());
    assert!(session.token().is_none());
}

#[tokio::test]
async fn test_save_overwrites_previous_session() {
    let store = MemoryTokenStore::new();
    store.save(&Token::new("tok-1", 1800, admin())).await.unwrap();

    let nurse = User::new(5, "nurse1", "nurse1@hospital.local", Role::Nurse);
    store.save(&Token::new("tok-2", 1800, nurse.clone())).await.unwrap();

    let session = store.read().await;
    assert_eq!(session.token(), Some("tok-2"));
    assert_eq!(session.user, Some(nurse));
}

#[tokio::test]
async fn test_save_user_keeps_token() {
    let store = MemoryTokenStore::with_session("tok-1", Some(admin()));

    let mut updated = admin();
    updated.email = "root@hospital.local".to_string();
    store.save_user(&updated).await.unwrap();

    let session = store.read().await;
    assert_eq!(session.token(), Some("tok-1"));
    assert_eq!(session.user.unwrap().email, "root@hospital.local");
}

#[tokio::test]
async fn test_clear_is_idempotent() {
    let store = MemoryTokenStore::with_session("tok-1", Some(admin()));

    store.clear().await.unwrap();
    store.clear().await.unwrap();

    assert_eq!(store.read().await, StoredSession::default());
}

#[tokio::test]
async fn test_clones_share_state() {
    let store = MemoryTokenStore::new();
    let other = store.clone();

    store.save(&Token::new("tok-1", 1800, admin())).await.unwrap();
    assert_eq!(other.read().await.token(), Some("tok-1"));
}

#[test]
fn test_blank_token_is_ignored() {
    let session = StoredSession {
        access_token: Some("  ".to_string()),
        user: None,
    };
    assert!(session.token().is_none());
    assert!(!session.is_empty());
}
