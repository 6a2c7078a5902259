//! Axum route handlers for the chat session.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::parser_client::ResumeUpload;
use crate::session::template::Template;
use crate::session::{SessionSnapshot, TurnOutcome};
use crate::state::AppState;

const RESUME_FIELD: &str = "resume";
const DEFAULT_FILE_NAME: &str = "resume";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub chip: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub prompt: String,
    #[serde(default)]
    pub jd_text: String,
}

#[derive(Debug, Deserialize)]
pub struct TemplateRequest {
    pub template: String,
}

#[derive(Debug, Serialize)]
pub struct TemplateResponse {
    pub template: Template,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/resume
///
/// Accepts the resume file (multipart field `resume`). Only the first file is
/// kept, and a later upload replaces it.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(RESUME_FIELD) {
            continue;
        }

        let file_name = field
            .file_name()
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_FILE_NAME)
            .to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Invalid file: {e}")))?;

        let chip = state
            .session
            .attach_resume(ResumeUpload {
                file_name,
                content_type,
                bytes,
            })
            .await;
        return Ok(Json(UploadResponse { chip }));
    }

    Err(AppError::Validation(format!(
        "multipart field '{RESUME_FIELD}' is required"
    )))
}

/// POST /api/chat
///
/// Runs one tailoring turn. Parse-service failures come back as an `Error: ...`
/// transcript message, not as an HTTP error.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<TurnOutcome>, AppError> {
    let outcome = state
        .session
        .send(&request.prompt, &request.jd_text)
        .await?;
    Ok(Json(outcome))
}

/// GET /api/session
pub async fn handle_get_session(State(state): State<AppState>) -> Json<SessionSnapshot> {
    Json(state.session.snapshot().await)
}

/// PUT /api/template
///
/// Unknown template names select the default layout.
pub async fn handle_set_template(
    State(state): State<AppState>,
    Json(request): Json<TemplateRequest>,
) -> Json<TemplateResponse> {
    let template = Template::from_name(&request.template);
    state.session.set_template(template).await;
    Json(TemplateResponse { template })
}
