//! Axum router configuration with middleware.
//!
//! Application routes are under `/api/`; `/health` sits at the root.
//! Middleware: request body limit, CORS (any origin), request tracing.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    let api_routes = Router::new()
        // Sessions
        .route("/sessions", post(handlers::session::list_sessions))
        .route(
            "/sessions/newsession",
            post(handlers::session::create_session),
        )
        .route(
            "/sessions/{id}",
            get(handlers::session::get_session).put(handlers::session::update_session),
        )
        // Messages
        .route(
            "/sessions/{id}/messages",
            get(handlers::message::list_messages).post(handlers::message::post_message),
        )
        // Accounts
        .route("/users/signup", post(handlers::user::signup))
        .route("/users/login", post(handlers::user::login))
        .route("/users/logout", get(handlers::user::logout));

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health_check))
        .layer(body_limit)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Liveness probe.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
