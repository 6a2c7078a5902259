use std::sync::Arc;

use crate::session::Session;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The single chat session. Owns the transcript, the view-model and the
    /// busy flag; its parser backend is an `Arc<dyn ResumeParser>`.
    pub session: Arc<Session>,
}
