use crate::{
    AppState,
    gate::GateOutcome,
    models::PageView,
    route_table::{RouteEntry, RouteTable},
    session::{Session, SessionState},
};
use axum::{
    Json, Router,
    extract::{FromRef, Request, State},
    middleware::{self, Next},
    response::{IntoResponse, Redirect, Response},
    routing::get,
};

/// RouteGuard
///
/// State carried by one page route's gate layer: where to read the session
/// from, and what the route requires.
#[derive(Clone)]
pub struct RouteGuard {
    sessions: SessionState,
    entry: RouteEntry,
}

impl FromRef<RouteGuard> for SessionState {
    fn from_ref(guard: &RouteGuard) -> SessionState {
        guard.sessions.clone()
    }
}

/// require_access
///
/// Gate layer for a single page route. Reads the role fresh on every request
/// and either forwards to the page handler or answers with a redirect
/// (`303 See Other`, which never becomes a history entry of its own).
async fn require_access(
    State(guard): State<RouteGuard>,
    session: Session,
    request: Request,
    next: Next,
) -> Response {
    let role = session.get_role().await;
    match guard.entry.evaluate(role.as_ref()) {
        GateOutcome::Render(_) => next.run(request).await,
        GateOutcome::Redirect(redirect) => Redirect::to(redirect.to).into_response(),
    }
}

/// page_routes
///
/// Registers one GET route per table entry. Entries that require a session
/// get the gate as a route layer; public entries are served directly.
pub fn page_routes(table: &RouteTable, sessions: SessionState) -> Router<AppState> {
    table.entries().iter().fold(Router::new(), |router, entry| {
        let page = entry.page;
        let path = entry.path;

        let handler = get(move || async move {
            Json(PageView {
                page,
                path: path.to_string(),
            })
        });

        let handler = if entry.requires_auth {
            handler.route_layer(middleware::from_fn_with_state(
                RouteGuard {
                    sessions: sessions.clone(),
                    entry: entry.clone(),
                },
                require_access,
            ))
        } else {
            handler
        };

        router.route(path, handler)
    })
}

/// redirect_unmatched
///
/// Wildcard fallback: any path without an entry goes home, whatever the
/// session says.
pub async fn redirect_unmatched(State(state): State<AppState>) -> Redirect {
    Redirect::to(state.routes.fallback().to)
}
