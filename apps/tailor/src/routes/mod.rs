pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};

use crate::session::handlers;
use crate::state::AppState;

/// Upper bound for the multipart resume upload.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/resume",
            post(handlers::handle_upload_resume).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/api/chat", post(handlers::handle_chat))
        .route("/api/session", get(handlers::handle_get_session))
        .route("/api/template", put(handlers::handle_set_template))
        .with_state(state)
}
