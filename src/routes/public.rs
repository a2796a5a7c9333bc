use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post, put},
};

/// Public Router Module
///
/// Endpoints reachable by any client, signed in or not. These never render a
/// page, so they are not subject to the gate: they are how a client signs in,
/// signs out, and asks where a navigation should end up.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Liveness probe for monitoring and load balancers.
        .route("/health", get(|| async { "ok" }))
        // POST /api/login
        // Validates the role and writes it to the caller's profile session.
        .route("/api/login", post(handlers::login))
        // POST /api/logout
        // Removes the role from the caller's profile session.
        .route("/api/logout", post(handlers::logout))
        // GET /api/session
        .route("/api/session", get(handlers::get_session))
        // PUT /api/session/language
        .route("/api/session/language", put(handlers::set_language))
        // GET /api/navigate?path=...
        // Routing decision as data, for client-side routers.
        .route("/api/navigate", get(handlers::navigate))
        // GET /api/routes
        .route("/api/routes", get(handlers::list_routes))
}
