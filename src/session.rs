use async_trait::async_trait;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{HeaderMap, request::Parts},
};
use sqlx::PgPool;
use std::{
    collections::HashMap,
    convert::Infallible,
    sync::{Arc, RwLock},
};
use uuid::Uuid;

use crate::models::{KnownRole, Language, Role};

/// Key under which a profile's role is persisted.
pub const ROLE_KEY: &str = "userRole";
/// Key under which a profile's UI language is persisted.
pub const LANGUAGE_KEY: &str = "userLanguage";
/// Request header identifying the browser profile a session belongs to.
pub const PROFILE_HEADER: &str = "x-profile-id";

// 1. SessionStore Contract
/// SessionStore
///
/// Durable key-value storage scoped per browser profile. The navigation core
/// only ever reads `ROLE_KEY`; login and logout are the only writers.
///
/// Swapping the implementation (Postgres in deployments, in-memory locally and
/// in tests) does not affect the gate or the handlers.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the stored value, or `None` when it is missing or the backing
    /// storage cannot be read.
    async fn get(&self, profile: Uuid, key: &str) -> Option<String>;

    /// Writes a value. Returns false if the write did not persist.
    async fn set(&self, profile: Uuid, key: &str, value: &str) -> bool;

    /// Removes a value. Removing a missing key succeeds.
    async fn remove(&self, profile: Uuid, key: &str) -> bool;
}

/// SessionState
///
/// The concrete type used to share session storage across the application state.
pub type SessionState = Arc<dyn SessionStore>;

// 2. The Durable Implementation (Postgres)
/// PostgresSessionStore
///
/// Persists session values in the `session_kv` table, one row per
/// (profile, key). Values outlive process restarts.
pub struct PostgresSessionStore {
    pool: PgPool,
}

impl PostgresSessionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// ensure_schema
    ///
    /// Creates the `session_kv` table if it does not already exist. Called at
    /// startup in `Env::Local` only; production schemas are managed by migrations.
    pub async fn ensure_schema(&self) {
        let result = sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS session_kv (
                profile_id UUID NOT NULL,
                key TEXT NOT NULL,
                value TEXT NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
                PRIMARY KEY (profile_id, key)
            )
            "#,
        )
        .execute(&self.pool)
        .await;

        if let Err(e) = result {
            tracing::warn!("session_kv schema setup failed: {:?}", e);
        }
    }
}

#[async_trait]
impl SessionStore for PostgresSessionStore {
    async fn get(&self, profile: Uuid, key: &str) -> Option<String> {
        // Read failures are indistinguishable from "no value" for callers.
        sqlx::query_scalar::<_, String>(
            "SELECT value FROM session_kv WHERE profile_id = $1 AND key = $2",
        )
        .bind(profile)
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
    }

    async fn set(&self, profile: Uuid, key: &str, value: &str) -> bool {
        let result = sqlx::query(
            r#"
            INSERT INTO session_kv (profile_id, key, value, updated_at)
            VALUES ($1, $2, $3, now())
            ON CONFLICT (profile_id, key)
            DO UPDATE SET value = EXCLUDED.value, updated_at = now()
            "#,
        )
        .bind(profile)
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => true,
            Err(e) => {
                tracing::error!("session set error: {:?}", e);
                false
            }
        }
    }

    async fn remove(&self, profile: Uuid, key: &str) -> bool {
        match sqlx::query("DELETE FROM session_kv WHERE profile_id = $1 AND key = $2")
            .bind(profile)
            .bind(key)
            .execute(&self.pool)
            .await
        {
            Ok(_) => true,
            Err(e) => {
                tracing::error!("session remove error: {:?}", e);
                false
            }
        }
    }
}

// 3. The In-Memory Implementation (Local runs & Tests)
/// InMemorySessionStore
///
/// Process-local store used when no database is configured and as the
/// injected fake in tests. Values are lost on restart.
#[derive(Default)]
pub struct InMemorySessionStore {
    entries: RwLock<HashMap<(Uuid, String), String>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, profile: Uuid, key: &str) -> Option<String> {
        let entries = self.entries.read().ok()?;
        entries.get(&(profile, key.to_string())).cloned()
    }

    async fn set(&self, profile: Uuid, key: &str, value: &str) -> bool {
        match self.entries.write() {
            Ok(mut entries) => {
                entries.insert((profile, key.to_string()), value.to_string());
                true
            }
            Err(_) => false,
        }
    }

    async fn remove(&self, profile: Uuid, key: &str) -> bool {
        match self.entries.write() {
            Ok(mut entries) => {
                entries.remove(&(profile, key.to_string()));
                true
            }
            Err(_) => false,
        }
    }
}

// --- Profile-Scoped Session ---

/// Session
///
/// One browser profile's view of the session store. Every read goes back to
/// the store, so a login or logout is observed by the very next navigation.
///
/// A request without a (valid) `x-profile-id` header still yields a `Session`;
/// it simply has no role.
#[derive(Clone)]
pub struct Session {
    store: SessionState,
    profile: Option<Uuid>,
}

impl Session {
    pub fn new(store: SessionState, profile: Option<Uuid>) -> Self {
        Self { store, profile }
    }

    /// from_headers
    ///
    /// Resolves the profile from the `x-profile-id` header. Missing or
    /// malformed ids resolve to an anonymous session.
    pub fn from_headers(store: SessionState, headers: &HeaderMap) -> Self {
        let profile = headers
            .get(PROFILE_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|raw| Uuid::parse_str(raw.trim()).ok());
        Self::new(store, profile)
    }

    pub fn profile(&self) -> Option<Uuid> {
        self.profile
    }

    /// Binds the session to a profile, keeping the existing one if present.
    pub fn or_new_profile(self) -> Self {
        let profile = self.profile.unwrap_or_else(Uuid::new_v4);
        Self {
            store: self.store,
            profile: Some(profile),
        }
    }

    /// get_role
    ///
    /// Reads the current role. Absent, empty, and unreadable values all come
    /// back as `None`.
    pub async fn get_role(&self) -> Option<Role> {
        let profile = self.profile?;
        self.store.get(profile, ROLE_KEY).await.and_then(Role::parse)
    }

    pub async fn set_role(&self, role: KnownRole) -> bool {
        match self.profile {
            Some(profile) => self.store.set(profile, ROLE_KEY, role.as_str()).await,
            None => false,
        }
    }

    /// Drops the role. Other preferences stay with the profile.
    pub async fn clear(&self) -> bool {
        match self.profile {
            Some(profile) => self.store.remove(profile, ROLE_KEY).await,
            None => true,
        }
    }

    /// Stored language, or the default when none (or garbage) is stored.
    pub async fn language(&self) -> Language {
        let Some(profile) = self.profile else {
            return Language::default();
        };
        self.store
            .get(profile, LANGUAGE_KEY)
            .await
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default()
    }

    pub async fn set_language(&self, language: Language) -> bool {
        match self.profile {
            Some(profile) => {
                self.store
                    .set(profile, LANGUAGE_KEY, language.as_str())
                    .await
            }
            None => false,
        }
    }
}

/// Session Extractor Implementation
///
/// Never rejects: an unidentified caller is simply a session without a role,
/// which the gate turns into a redirect to the login page.
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
    SessionState: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let store = SessionState::from_ref(state);
        Ok(Session::from_headers(store, &parts.headers))
    }
}
