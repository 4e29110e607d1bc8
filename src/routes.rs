use axum::{
    middleware,
    routing::get,
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::auth::{self, middleware::redirect_if_authenticated, middleware::require_auth};
use crate::config::session::SessionLayer;
use crate::handlers;
use crate::middleware::add_security_headers;
use crate::AppState;

/// Builds the full application router.
pub fn build_router(state: AppState, session_layer: SessionLayer) -> Router {
    let protected_routes = Router::new()
        .route("/appointments", get(handlers::list_appointments_handler))
        .route("/logout", get(auth::handlers::logout_handler))
        .layer(middleware::from_fn(require_auth));

    let login_routes = Router::new()
        .route(
            "/login",
            get(auth::handlers::login_page).post(auth::handlers::login_handler),
        )
        .layer(middleware::from_fn(redirect_if_authenticated));

    Router::new()
        .route("/", get(handlers::index_handler))
        .route(
            "/add_appointment",
            get(handlers::new_appointment_page).post(handlers::create_appointment_handler),
        )
        .merge(login_routes)
        .merge(protected_routes)
        .nest_service("/static", ServeDir::new("static"))
        .layer(session_layer)
        .layer(middleware::from_fn(add_security_headers))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
