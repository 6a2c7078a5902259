/// Parser client: the single point of entry for calls to the external
/// resume/JD parse service.
///
/// One multipart POST per chat turn, bounded by a client-side timeout.
/// No retries: a failure is surfaced once and the user re-triggers manually.
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::lenient::truthy;
use crate::models::raw::ParseResponse;

const PARSE_PATH: &str = "/api/parse";

/// Transport failures. The `Display` text is the message shown to the user.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timeout after {0:?}")]
    Timeout(Duration),

    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Server returned non-JSON response")]
    NonJson,
}

impl ParseError {
    /// HTTP status of a non-2xx response, if the service answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ParseError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// The resume file as uploaded by the user.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

#[derive(Debug, Clone)]
pub struct ParseRequest {
    pub resume: ResumeUpload,
    pub jd_text: String,
    pub prompt: String,
}

/// Backend that turns a resume file plus job description into raw JSON.
///
/// Carried in `AppState` as `Arc<dyn ResumeParser>`.
#[async_trait]
pub trait ResumeParser: Send + Sync {
    async fn parse(&self, request: &ParseRequest) -> Result<ParseResponse, ParseError>;
}

/// `reqwest` implementation posting to `<base_url>/api/parse`.
#[derive(Clone)]
pub struct HttpParser {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpParser {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            endpoint: format!("{}{PARSE_PATH}", base_url.trim_end_matches('/')),
            timeout,
        })
    }

    fn transport_error(&self, e: reqwest::Error) -> ParseError {
        if e.is_timeout() {
            ParseError::Timeout(self.timeout)
        } else {
            ParseError::Network(e.to_string())
        }
    }
}

#[async_trait]
impl ResumeParser for HttpParser {
    async fn parse(&self, request: &ParseRequest) -> Result<ParseResponse, ParseError> {
        let response = self
            .client
            .post(&self.endpoint)
            .multipart(build_form(request))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains("application/json"));
        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            let message = error_message(status.as_u16(), is_json, &body);
            warn!("Parse service returned {}: {}", status, message);
            return Err(ParseError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let parsed = decode_success(&body)?;
        debug!("Parse call succeeded: {} bytes", body.len());
        Ok(parsed)
    }
}

fn build_form(request: &ParseRequest) -> Form {
    let mut form = Form::new().part("resume", resume_part(&request.resume));
    if !request.jd_text.is_empty() {
        form = form.text("jd_text", request.jd_text.clone());
    }
    if !request.prompt.is_empty() {
        form = form.text("prompt", request.prompt.clone());
    }
    form
}

/// File part carrying the upload's mime type, or none if that type is malformed.
fn resume_part(upload: &ResumeUpload) -> Part {
    let part = || Part::bytes(upload.bytes.to_vec()).file_name(upload.file_name.clone());
    upload
        .content_type
        .as_deref()
        .and_then(|mime| part().mime_str(mime).ok())
        .unwrap_or_else(part)
}

/// Human-readable message for a non-2xx response: the JSON `detail` field,
/// else the whole JSON body, else the raw text, else a generic status line.
fn error_message(status: u16, is_json: bool, body: &str) -> String {
    let fallback = format!("parse failed ({status})");

    if is_json {
        return match serde_json::from_str::<Value>(body) {
            Ok(Value::Null) | Err(_) => fallback,
            Ok(json) => match json.get("detail") {
                Some(Value::String(detail)) if !detail.is_empty() => detail.clone(),
                Some(detail) if truthy(detail) => detail.to_string(),
                _ => json.to_string(),
            },
        };
    }

    if body.is_empty() {
        fallback
    } else {
        body.to_string()
    }
}

/// Success bodies are decoded as JSON whatever their declared content type.
fn decode_success(body: &str) -> Result<ParseResponse, ParseError> {
    let json: Value = serde_json::from_str(body).map_err(|_| ParseError::NonJson)?;
    Ok(serde_json::from_value(json).unwrap_or_default())
}
