use async_trait::async_trait;
use axum::http::{HeaderMap, HeaderValue};
use farmer_portal::{
    models::{KnownRole, Language, Role},
    session::{
        InMemorySessionStore, LANGUAGE_KEY, PROFILE_HEADER, ROLE_KEY, Session, SessionState,
        SessionStore,
    },
};
use std::sync::Arc;
use uuid::Uuid;

// --- Mock Store: storage unavailable ---

struct UnavailableStore;

#[async_trait]
impl SessionStore for UnavailableStore {
    async fn get(&self, _profile: Uuid, _key: &str) -> Option<String> {
        None
    }
    async fn set(&self, _profile: Uuid, _key: &str, _value: &str) -> bool {
        false
    }
    async fn remove(&self, _profile: Uuid, _key: &str) -> bool {
        false
    }
}

const PROFILE: Uuid = Uuid::from_u128(42);

fn memory_store() -> SessionState {
    Arc::new(InMemorySessionStore::new())
}

// --- Store Contract ---

#[tokio::test]
async fn test_in_memory_get_set_remove() {
    let store = InMemorySessionStore::new();

    assert_eq!(store.get(PROFILE, ROLE_KEY).await, None);
    assert!(store.set(PROFILE, ROLE_KEY, "Farmer").await);
    assert_eq!(store.get(PROFILE, ROLE_KEY).await.as_deref(), Some("Farmer"));

    assert!(store.remove(PROFILE, ROLE_KEY).await);
    assert_eq!(store.get(PROFILE, ROLE_KEY).await, None);

    // Removing again is still a success.
    assert!(store.remove(PROFILE, ROLE_KEY).await);
}

#[tokio::test]
async fn test_in_memory_scopes_values_per_profile() {
    let store = InMemorySessionStore::new();
    let other = Uuid::from_u128(7);

    store.set(PROFILE, ROLE_KEY, "Farmer").await;
    store.set(other, ROLE_KEY, "Officer").await;

    assert_eq!(store.get(PROFILE, ROLE_KEY).await.as_deref(), Some("Farmer"));
    assert_eq!(store.get(other, ROLE_KEY).await.as_deref(), Some("Officer"));
}

// --- Session: get_role ---

#[tokio::test]
async fn test_get_role_reads_stored_value() {
    let store = memory_store();
    store.set(PROFILE, ROLE_KEY, "Officer").await;

    let session = Session::new(store, Some(PROFILE));

    assert_eq!(session.get_role().await, Some(Role::from(KnownRole::Officer)));
}

#[tokio::test]
async fn test_get_role_keeps_unknown_roles_verbatim() {
    let store = memory_store();
    store.set(PROFILE, ROLE_KEY, "officer").await;

    let session = Session::new(store, Some(PROFILE));

    assert_eq!(session.get_role().await, Role::parse("officer"));
}

#[tokio::test]
async fn test_get_role_empty_value_is_absent() {
    let store = memory_store();
    store.set(PROFILE, ROLE_KEY, "").await;

    let session = Session::new(store, Some(PROFILE));

    assert_eq!(session.get_role().await, None);
}

#[tokio::test]
async fn test_get_role_without_profile_is_absent() {
    let store = memory_store();
    store.set(PROFILE, ROLE_KEY, "Farmer").await;

    let session = Session::new(store, None);

    assert_eq!(session.get_role().await, None);
}

#[tokio::test]
async fn test_get_role_unavailable_storage_is_absent() {
    let session = Session::new(Arc::new(UnavailableStore), Some(PROFILE));

    assert_eq!(session.get_role().await, None);
}

#[tokio::test]
async fn test_get_role_observes_changes_immediately() {
    let store = memory_store();
    let session = Session::new(store.clone(), Some(PROFILE));

    assert_eq!(session.get_role().await, None);

    // A write made elsewhere (another request, another handle) is seen on the next read.
    store.set(PROFILE, ROLE_KEY, "Farmer").await;
    assert_eq!(session.get_role().await, Some(Role::from(KnownRole::Farmer)));

    store.remove(PROFILE, ROLE_KEY).await;
    assert_eq!(session.get_role().await, None);
}

// --- Session: writes ---

#[tokio::test]
async fn test_set_role_and_clear() {
    let session = Session::new(memory_store(), Some(PROFILE));

    assert!(session.set_role(KnownRole::Farmer).await);
    assert_eq!(session.get_role().await, Some(Role::from(KnownRole::Farmer)));

    assert!(session.clear().await);
    assert_eq!(session.get_role().await, None);
}

#[tokio::test]
async fn test_clear_keeps_language() {
    let store = memory_store();
    let session = Session::new(store.clone(), Some(PROFILE));

    session.set_role(KnownRole::Farmer).await;
    session.set_language(Language::Tamil).await;
    session.clear().await;

    assert_eq!(session.language().await, Language::Tamil);
    assert_eq!(store.get(PROFILE, LANGUAGE_KEY).await.as_deref(), Some("Tamil"));
}

#[tokio::test]
async fn test_set_role_without_profile_fails() {
    let session = Session::new(memory_store(), None);
    assert!(!session.set_role(KnownRole::Officer).await);
}

#[tokio::test]
async fn test_or_new_profile_keeps_existing_profile() {
    let session = Session::new(memory_store(), Some(PROFILE)).or_new_profile();
    assert_eq!(session.profile(), Some(PROFILE));

    let fresh = Session::new(memory_store(), None).or_new_profile();
    assert!(fresh.profile().is_some());
}

#[tokio::test]
async fn test_language_defaults_to_english() {
    let store = memory_store();
    let session = Session::new(store.clone(), Some(PROFILE));
    assert_eq!(session.language().await, Language::English);

    store.set(PROFILE, LANGUAGE_KEY, "Klingon").await;
    assert_eq!(session.language().await, Language::English);

    assert_eq!(Session::new(store, None).language().await, Language::English);
}

// --- Header Resolution ---

#[tokio::test]
async fn test_from_headers_parses_profile() {
    let mut headers = HeaderMap::new();
    headers.insert(
        PROFILE_HEADER,
        HeaderValue::from_str(&PROFILE.to_string()).unwrap(),
    );

    let session = Session::from_headers(memory_store(), &headers);

    assert_eq!(session.profile(), Some(PROFILE));
}

#[tokio::test]
async fn test_from_headers_malformed_profile_is_anonymous() {
    let mut headers = HeaderMap::new();
    headers.insert(PROFILE_HEADER, HeaderValue::from_static("not-a-uuid"));

    let session = Session::from_headers(memory_store(), &headers);

    assert_eq!(session.profile(), None);
    assert_eq!(session.get_role().await, None);
}
