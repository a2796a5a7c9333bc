use crate::{
    AppState,
    models::{
        KnownRole, LanguageRequest, LoginRequest, LoginResponse, NavigationOutcome, RouteSummary,
        SessionView,
    },
    session::Session,
};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use chrono::Utc;
use serde::Deserialize;

// --- Query Structs ---

/// NavigateQuery
///
/// Query parameters for GET /api/navigate.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct NavigateQuery {
    /// Client-side path being navigated to, e.g. `/profile`.
    pub path: String,
}

// --- Handlers ---

/// login
///
/// [Public Route] Records the caller's role for their browser profile.
///
/// The role must be one the platform issues (`Farmer` or `Officer`); anything
/// else is rejected with 400 and nothing is written. A caller without an
/// `x-profile-id` header gets a fresh profile id in the response.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 400, description = "Unknown role")
    )
)]
pub async fn login(
    session: Session,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, StatusCode> {
    let role: KnownRole = payload.role.parse().map_err(|_| StatusCode::BAD_REQUEST)?;

    let session = session.or_new_profile();
    let profile_id = session.profile().ok_or(StatusCode::INTERNAL_SERVER_ERROR)?;

    if !session.set_role(role).await {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }

    tracing::info!(profile = %profile_id, role = role.as_str(), "login");

    Ok(Json(LoginResponse {
        profile_id,
        role: role.into(),
        logged_in_at: Utc::now(),
    }))
}

/// logout
///
/// [Public Route] Clears the role for the caller's profile. Logging out an
/// anonymous caller is a no-op and still succeeds.
#[utoipa::path(
    post,
    path = "/api/logout",
    responses(
        (status = 204, description = "Logged out"),
        (status = 500, description = "Session store write failed")
    )
)]
pub async fn logout(session: Session) -> StatusCode {
    if !session.clear().await {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }
    if let Some(profile) = session.profile() {
        tracing::info!(profile = %profile, "logout");
    }
    StatusCode::NO_CONTENT
}

/// get_session
///
/// [Public Route] Reports the caller's current role and language.
#[utoipa::path(
    get,
    path = "/api/session",
    responses((status = 200, description = "Current session", body = SessionView))
)]
pub async fn get_session(session: Session) -> Json<SessionView> {
    Json(SessionView {
        profile_id: session.profile(),
        role: session.get_role().await,
        language: session.language().await,
    })
}

/// set_language
///
/// [Public Route] Persists the UI language for the caller's profile.
/// Requires an identified profile (400 otherwise).
#[utoipa::path(
    put,
    path = "/api/session/language",
    request_body = LanguageRequest,
    responses(
        (status = 204, description = "Saved"),
        (status = 400, description = "No profile")
    )
)]
pub async fn set_language(session: Session, Json(payload): Json<LanguageRequest>) -> StatusCode {
    if session.profile().is_none() {
        return StatusCode::BAD_REQUEST;
    }
    if session.set_language(payload.language).await {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// navigate
///
/// [Public Route] Returns the routing decision for `path` without performing
/// it, for client-side routers. Same outcome as requesting the page route:
/// a query string or fragment on `path` does not take part in matching.
#[utoipa::path(
    get,
    path = "/api/navigate",
    params(NavigateQuery),
    responses((status = 200, description = "Routing decision", body = NavigationOutcome))
)]
pub async fn navigate(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<NavigateQuery>,
) -> Json<NavigationOutcome> {
    let path = query.path.split(['?', '#']).next().unwrap_or_default();
    let role = session.get_role().await;
    Json(state.routes.navigate(path, role.as_ref()))
}

/// list_routes
///
/// [Public Route] Lists the declared route table (the wildcard is implicit).
#[utoipa::path(
    get,
    path = "/api/routes",
    responses((status = 200, description = "Route table", body = [RouteSummary]))
)]
pub async fn list_routes(State(state): State<AppState>) -> Json<Vec<RouteSummary>> {
    Json(state.routes.entries().iter().map(|entry| entry.summary()).collect())
}
