//! Chat session: the one resume upload, the transcript, the current view-model
//! and the selected template, plus the busy flag that keeps at most one parse
//! request in flight.

pub mod handlers;
pub mod template;
pub mod transcript;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::view::NormalizedView;
use crate::normalize::normalize_data;
use crate::parser_client::{ParseRequest, ResumeParser, ResumeUpload};

use self::template::Template;
use self::transcript::{ats_messages, Message, MessageMeta};

/// Messages appended by one chat turn, and the view-model after it.
#[derive(Debug, Clone, Serialize)]
pub struct TurnOutcome {
    pub messages: Vec<Message>,
    pub view: Option<NormalizedView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub transcript: Vec<Message>,
    pub view: Option<NormalizedView>,
    pub document_title: Option<String>,
    pub template: Template,
    pub templates: [Template; 4],
    pub busy: bool,
    pub has_resume: bool,
}

struct SessionState {
    transcript: Vec<Message>,
    view: Option<NormalizedView>,
    template: Template,
    resume: Option<ResumeUpload>,
}

pub struct Session {
    parser: Arc<dyn ResumeParser>,
    busy: AtomicBool,
    state: RwLock<SessionState>,
}

/// Holds the busy flag for one parse request; clears it on drop, whether the
/// request succeeded, failed or the turn was cancelled.
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Session {
    pub fn new(parser: Arc<dyn ResumeParser>) -> Self {
        Self {
            parser,
            busy: AtomicBool::new(false),
            state: RwLock::new(SessionState {
                transcript: vec![Message::assistant(transcript::GREETING)],
                view: None,
                template: Template::default(),
                resume: None,
            }),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Stores the resume for later turns, replacing any earlier upload.
    /// Returns the chip text shown next to the drop zone.
    pub async fn attach_resume(&self, upload: ResumeUpload) -> String {
        let chip = format!("Resume: {}", upload.file_name);
        info!(
            "Resume attached: {} ({} bytes)",
            upload.file_name,
            upload.bytes.len()
        );
        self.state.write().await.resume = Some(upload);
        chip
    }

    pub async fn set_template(&self, template: Template) {
        self.state.write().await.template = template;
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.read().await;
        SessionSnapshot {
            transcript: state.transcript.clone(),
            view: state.view.clone(),
            document_title: state.view.as_ref().map(|v| v.document_title().to_string()),
            template: state.template,
            templates: Template::ALL,
            busy: self.is_busy(),
            has_resume: state.resume.is_some(),
        }
    }

    /// One chat turn: validate inputs, call the parse service, normalize the
    /// result and report back through the transcript.
    ///
    /// Parse failures are terminal for the turn and land in the transcript as
    /// `Error: ...`; only a blank prompt or a request already in flight is
    /// returned as an error.
    pub async fn send(&self, prompt: &str, jd_text: &str) -> Result<TurnOutcome, AppError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(AppError::Validation("prompt cannot be empty".to_string()));
        }
        let _busy = BusyGuard::acquire(&self.busy).ok_or(AppError::Busy)?;

        let mut turn = Vec::new();
        self.post(&mut turn, Message::user(prompt)).await;

        let resume = self.state.read().await.resume.clone();
        let Some(resume) = resume else {
            self.post(&mut turn, Message::assistant(transcript::MISSING_RESUME))
                .await;
            return Ok(self.outcome(turn).await);
        };
        if jd_text.trim().is_empty() {
            self.post(&mut turn, Message::assistant(transcript::MISSING_JD))
                .await;
            return Ok(self.outcome(turn).await);
        }

        self.post(
            &mut turn,
            Message::assistant(transcript::IN_PROGRESS).with_meta(MessageMeta {
                tips: Some(transcript::IN_PROGRESS_TIP.to_string()),
                meter: None,
            }),
        )
        .await;

        let request = ParseRequest {
            resume,
            jd_text: jd_text.to_string(),
            prompt: prompt.to_string(),
        };
        let request_id = Uuid::new_v4();
        let started = Instant::now();

        match self.parser.parse(&request).await {
            Ok(parsed) => {
                let view = normalize_data(&parsed);
                info!(
                    "Parse {request_id} succeeded in {}ms: {} skills ({} core, {} nice, {} other)",
                    started.elapsed().as_millis(),
                    view.skills.len(),
                    view.skills_grouped.core.len(),
                    view.skills_grouped.nice.len(),
                    view.skills_grouped.other.len()
                );
                self.state.write().await.view = Some(view);

                self.post(&mut turn, Message::assistant(transcript::DONE))
                    .await;
                for message in ats_messages(&parsed.meta) {
                    self.post(&mut turn, message).await;
                }
            }
            Err(e) => {
                warn!(
                    "Parse {request_id} failed after {}ms (status: {:?}): {e}",
                    started.elapsed().as_millis(),
                    e.status()
                );
                self.post(&mut turn, Message::assistant(format!("Error: {e}")))
                    .await;
            }
        }

        Ok(self.outcome(turn).await)
    }

    /// Appends to the shared transcript as the turn progresses, so a snapshot
    /// taken mid-request shows the in-progress message.
    async fn post(&self, turn: &mut Vec<Message>, message: Message) {
        self.state.write().await.transcript.push(message.clone());
        turn.push(message);
    }

    async fn outcome(&self, messages: Vec<Message>) -> TurnOutcome {
        TurnOutcome {
            messages,
            view: self.state.read().await.view.clone(),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::raw::ParseResponse;
    use crate::parser_client::ParseError;
    use async_trait::async_trait;
    use bytes::Bytes;
    use serde_json::json;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;
    use tokio::sync::Notify;

    type Reply = Box<dyn Fn(&ParseRequest) -> Result<ParseResponse, ParseError> + Send + Sync>;

    /// Parser double that counts calls and can be held open until released.
    pub(crate) struct FakeParser {
        reply: Reply,
        gate: Option<Arc<Notify>>,
        pub calls: AtomicUsize,
    }

    impl FakeParser {
        pub(crate) fn replying(
            reply: impl Fn(&ParseRequest) -> Result<ParseResponse, ParseError> + Send + Sync + 'static,
        ) -> Self {
            Self {
                reply: Box::new(reply),
                gate: None,
                calls: AtomicUsize::new(0),
            }
        }

        pub(crate) fn gated(mut self, gate: Arc<Notify>) -> Self {
            self.gate = Some(gate);
            self
        }
    }

    #[async_trait]
    impl ResumeParser for FakeParser {
        async fn parse(&self, request: &ParseRequest) -> Result<ParseResponse, ParseError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            (self.reply)(request)
        }
    }

    pub(crate) fn sample_response() -> ParseResponse {
        serde_json::from_value(json!({
            "resume": {"name": "Ada Lovelace", "skills": ["Python", "Java"]},
            "job": {
                "title": "Backend Engineer",
                "skills_required": ["Python", "Go"],
                "nice_to_have": ["Go", "Rust"]
            },
            "meta": {"ats_score": 82, "ats": {"required": {"missing": ["Kubernetes"]}}}
        }))
        .unwrap()
    }

    pub(crate) fn upload() -> ResumeUpload {
        ResumeUpload {
            file_name: "cv.pdf".to_string(),
            content_type: Some("application/pdf".to_string()),
            bytes: Bytes::from_static(b"%PDF-1.4"),
        }
    }

    fn contents(messages: &[Message]) -> Vec<&str> {
        messages.iter().map(|m| m.content.as_str()).collect()
    }

    #[tokio::test]
    async fn test_blank_prompt_is_rejected_without_transcript_entry() {
        let parser = Arc::new(FakeParser::replying(|_| Ok(sample_response())));
        let session = Session::new(parser.clone());

        let err = session.send("   ", "JD").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(session.snapshot().await.transcript.len(), 1);
        assert_eq!(parser.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_resume_short_circuits() {
        let parser = Arc::new(FakeParser::replying(|_| Ok(sample_response())));
        let session = Session::new(parser.clone());

        let outcome = session.send("Backend focus", "Rust engineer").await.unwrap();
        assert_eq!(
            contents(&outcome.messages),
            vec!["Backend focus", transcript::MISSING_RESUME]
        );
        assert_eq!(outcome.messages[0].role, transcript::Role::User);
        assert!(outcome.view.is_none());
        assert_eq!(parser.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_blank_job_description_short_circuits() {
        let parser = Arc::new(FakeParser::replying(|_| Ok(sample_response())));
        let session = Session::new(parser.clone());
        session.attach_resume(upload()).await;

        let outcome = session.send("Backend focus", " \n ").await.unwrap();
        assert_eq!(
            contents(&outcome.messages),
            vec!["Backend focus", transcript::MISSING_JD]
        );
        assert_eq!(parser.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_successful_turn_updates_view_and_reports_score() {
        let parser = Arc::new(FakeParser::replying(|request| {
            assert_eq!(request.prompt, "Backend focus");
            assert_eq!(request.jd_text, "Rust engineer");
            assert_eq!(request.resume.file_name, "cv.pdf");
            Ok(sample_response())
        }));
        let session = Session::new(parser.clone());
        assert_eq!(session.attach_resume(upload()).await, "Resume: cv.pdf");

        let outcome = session.send("  Backend focus ", "Rust engineer").await.unwrap();
        assert_eq!(
            contents(&outcome.messages),
            vec![
                "Backend focus",
                transcript::IN_PROGRESS,
                transcript::DONE,
                "ATS Match Score: 82%",
                "Missing (Core): Kubernetes",
            ]
        );
        let tips = outcome.messages[1].meta.as_ref().and_then(|m| m.tips.as_deref());
        assert_eq!(tips, Some(transcript::IN_PROGRESS_TIP));

        let view = outcome.view.unwrap();
        assert_eq!(view.name, "Ada Lovelace");
        assert_eq!(view.skills_grouped.other, vec!["Java"]);

        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.transcript.len(), 6);
        assert_eq!(snapshot.document_title.as_deref(), Some("Ada Lovelace"));
        assert!(!snapshot.busy);
        assert!(snapshot.has_resume);
    }

    #[tokio::test]
    async fn test_failed_turn_keeps_previous_view() {
        let fail = Arc::new(AtomicBool::new(false));
        let flag = fail.clone();
        let parser = Arc::new(FakeParser::replying(move |_| {
            if flag.load(Ordering::SeqCst) {
                Err(ParseError::Timeout(Duration::from_secs(60)))
            } else {
                Ok(sample_response())
            }
        }));
        let session = Session::new(parser.clone());
        session.attach_resume(upload()).await;
        session.send("first", "JD").await.unwrap();

        fail.store(true, Ordering::SeqCst);
        let outcome = session.send("second", "JD").await.unwrap();
        assert_eq!(
            outcome.messages.last().map(|m| m.content.as_str()),
            Some("Error: Request timeout after 60s")
        );
        assert_eq!(outcome.view.map(|v| v.name), Some("Ada Lovelace".to_string()));
        assert!(!session.is_busy());
        assert_eq!(parser.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_second_turn_is_rejected_while_busy() {
        let gate = Arc::new(Notify::new());
        let parser =
            Arc::new(FakeParser::replying(|_| Ok(sample_response())).gated(gate.clone()));
        let session = Arc::new(Session::new(parser.clone()));
        session.attach_resume(upload()).await;

        let first = tokio::spawn({
            let session = session.clone();
            async move { session.send("first", "JD").await }
        });
        while parser.calls.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }

        let in_flight = session.snapshot().await;
        assert!(in_flight.busy);
        assert_eq!(
            in_flight.transcript.last().map(|m| m.content.as_str()),
            Some(transcript::IN_PROGRESS)
        );
        let err = session.send("second", "JD").await.unwrap_err();
        assert!(matches!(err, AppError::Busy));
        assert_eq!(session.snapshot().await.transcript.len(), in_flight.transcript.len());

        gate.notify_one();
        let outcome = first.await.unwrap().unwrap();
        assert!(outcome.view.is_some());
        assert!(!session.is_busy());
        assert_eq!(parser.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_template_selection() {
        let session = Session::new(Arc::new(FakeParser::replying(|_| Ok(sample_response()))));
        assert_eq!(session.snapshot().await.template, Template::Faang);
        session.set_template(Template::Compact).await;
        assert_eq!(session.snapshot().await.template, Template::Compact);
    }
}
