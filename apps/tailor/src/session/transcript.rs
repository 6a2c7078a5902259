//! Chat transcript entries and the canned assistant replies.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::raw::ParseMeta;

pub const GREETING: &str = "Upload your Resume above, paste JD below, then tell me how to tailor it (e.g., “Backend Engineer, AWS focus”).";
pub const MISSING_RESUME: &str = "Please upload a Resume file to proceed.";
pub const MISSING_JD: &str = "Please paste the Job Description.";
pub const IN_PROGRESS: &str = "Parsing & tailoring…";
pub const IN_PROGRESS_TIP: &str = "Switch templates on the right.";
pub const DONE: &str = "Done! Preview updated on the right.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub id: Uuid,
    pub role: Role,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<MessageMeta>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content: content.into(),
            meta: None,
            created_at: Utc::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn with_meta(mut self, meta: MessageMeta) -> Self {
        self.meta = Some(meta);
        self
    }
}

/// Extra decorations rendered under a message bubble.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MessageMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tips: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meter: Option<Meter>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Meter {
    pub value: f64,
    pub max: f64,
    pub label: String,
    /// Fill of the meter bar in `[0, 100]`.
    pub percent: f64,
}

impl Meter {
    /// A zero `max` counts as 100.
    pub fn new(value: f64, max: f64, label: impl Into<String>) -> Self {
        let scale = if max == 0.0 { 100.0 } else { max };
        Self {
            value,
            max,
            label: label.into(),
            percent: (value / scale * 100.0).clamp(0.0, 100.0),
        }
    }
}

/// Score and missing-skill messages for a finished parse. Empty when the
/// service did not score the match.
pub fn ats_messages(meta: &ParseMeta) -> Vec<Message> {
    let Some(score) = meta.ats_score else {
        return Vec::new();
    };

    let mut messages = vec![Message::assistant(format!("ATS Match Score: {score}%")).with_meta(
        MessageMeta {
            tips: None,
            meter: Some(Meter::new(score, 100.0, "ATS Match")),
        },
    )];

    let mut missing = Vec::new();
    if !meta.ats.required.missing.is_empty() {
        missing.push(format!("Missing (Core): {}", meta.ats.required.missing.join(", ")));
    }
    if !meta.ats.nice.missing.is_empty() {
        missing.push(format!("Missing (Nice): {}", meta.ats.nice.missing.join(", ")));
    }
    if !missing.is_empty() {
        messages.push(Message::assistant(missing.join("\n")));
    }

    messages
}
