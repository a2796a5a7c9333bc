use std::env;

/// AppConfig
///
/// Holds the application's configuration. Immutable once loaded and consumed
/// by `main` to pick the session store, log format and listen address.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Postgres connection string backing the durable session store.
    // `None` (local only) selects the in-memory store.
    pub db_url: Option<String>,
    // Socket address the HTTP server binds to.
    pub bind_addr: String,
    // Runtime environment marker. Selects log format and schema bootstrapping.
    pub env: Env,
}

/// Env
///
/// Runtime context: developer conveniences in `Local`, strict configuration in
/// `Production`.
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

impl Default for AppConfig {
    /// default
    ///
    /// Non-panicking configuration for tests: local mode, in-memory sessions.
    fn default() -> Self {
        Self {
            db_url: None,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            env: Env::Local,
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads configuration from the environment at startup (fail-fast).
    ///
    /// # Panics
    /// Panics in production when `DATABASE_URL` is not set. Production sessions
    /// are always Postgres-backed.
    pub fn load() -> Self {
        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let env = match env_str.as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        match env {
            Env::Local => Self {
                env: Env::Local,
                db_url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
                bind_addr,
            },
            Env::Production => Self {
                env: Env::Production,
                db_url: Some(
                    env::var("DATABASE_URL").expect("FATAL: DATABASE_URL required in prod"),
                ),
                bind_addr,
            },
        }
    }
}
