use axum::{
    Router,
    extract::FromRef,
    http::HeaderName,
};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Core navigation components.
pub mod config;
pub mod gate;
pub mod handlers;
pub mod models;
pub mod route_table;
pub mod session;

// Router assembly (ungated API, gated pages).
pub mod routes;
use routes::{pages, public};

// --- Public Re-exports ---

pub use config::AppConfig;
pub use route_table::RouteTable;
pub use session::{InMemorySessionStore, PostgresSessionStore, Session, SessionState};

/// ApiDoc
///
/// OpenAPI document for the session and navigation API, served at
/// `/api-docs/openapi.json`. Page routes are generated from the route table
/// and are listed by `GET /api/routes` instead.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::login, handlers::logout, handlers::get_session,
        handlers::set_language, handlers::navigate, handlers::list_routes
    ),
    components(
        schemas(
            models::Role, models::KnownRole, models::Page, models::Language,
            models::NavigationOutcome, models::PageView, models::RouteSummary,
            models::LoginRequest, models::LoginResponse, models::SessionView,
            models::LanguageRequest,
        )
    ),
    tags(
        (name = "farmer-portal", description = "Farmer portal navigation API")
    )
)]
struct ApiDoc;

/// AppState
///
/// Shared by every request: the session store and the immutable route table.
#[derive(Clone)]
pub struct AppState {
    /// Session Layer: per-profile role and preference storage.
    pub sessions: SessionState,
    /// Route table, built once at startup.
    pub routes: Arc<RouteTable>,
}

impl AppState {
    /// Standard route table over the given session store.
    pub fn new(sessions: SessionState) -> Self {
        Self {
            sessions,
            routes: Arc::new(RouteTable::standard()),
        }
    }
}

// --- Axum FromRef Extractor Implementations ---

impl FromRef<AppState> for SessionState {
    fn from_ref(app_state: &AppState) -> SessionState {
        app_state.sessions.clone()
    }
}

/// create_router
///
/// Assembles the routing structure, applies global middleware, and registers
/// the application state.
pub fn create_router(state: AppState) -> Router {
    // 1. CORS Configuration
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    // Header name constant for Request Correlation.
    let x_request_id = HeaderName::from_static("x-request-id");

    // 2. Base Router Assembly
    let base_router = Router::new()
        // Documentation: Serve the auto-generated Swagger UI.
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Session & navigation API: never gated.
        .merge(public::public_routes())
        // Pages: one route per table entry, gate attached per route.
        .merge(pages::page_routes(&state.routes, state.sessions.clone()))
        // Wildcard: unmatched paths redirect home before any gate runs.
        .fallback(pages::redirect_unmatched)
        .with_state(state);

    // 3. Observability and Correlation Layers
    base_router
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// trace_span_logger
///
/// Builds the per-request span, tagging it with the `x-request-id` so every
/// log line of one request can be correlated.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
