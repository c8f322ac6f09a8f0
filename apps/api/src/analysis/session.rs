//! Session controller — runs one upload through its whole lifecycle:
//!
//! `Idle → Uploaded → TextExtracted → AwaitingAction → ActionSelected → ResultDisplayed → Idle`
//!
//! A document with no recoverable text ends in `EmptyContent`. The staged file
//! is owned by a `StagedUpload`, so it is removed on every path out of `run`,
//! including early returns and errors.

use std::path::Path;

use bytes::Bytes;
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::analysis::models::{action_menu, Action, ActionOption};
use crate::analysis::prompts::build_prompt;
use crate::document::chunking::{split_text, ChunkConfig};
use crate::document::extractor::extract_text_from_path;
use crate::document::staging::StagedUpload;
use crate::errors::AppError;
use crate::llm_client::{CompletionClient, CompletionOutcome};

pub const EMPTY_CONTENT_MESSAGE: &str =
    "Failed to extract text from the resume. Please upload a valid PDF.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    Uploaded,
    TextExtracted,
    AwaitingAction,
    ActionSelected,
    ResultDisplayed,
    EmptyContent,
}

impl SessionState {
    fn can_advance_to(self, next: SessionState) -> bool {
        use SessionState::*;
        matches!(
            (self, next),
            (Idle, Uploaded)
                | (Uploaded, TextExtracted)
                | (Uploaded, EmptyContent)
                | (TextExtracted, AwaitingAction)
                | (AwaitingAction, ActionSelected)
                | (ActionSelected, ResultDisplayed)
                | (AwaitingAction, Idle)
                | (ResultDisplayed, Idle)
                | (EmptyContent, Idle)
        )
    }
}

/// Tracks the lifecycle of one session and rejects out-of-order steps.
struct SessionTracker {
    session_id: Uuid,
    state: SessionState,
}

impl SessionTracker {
    fn new(session_id: Uuid) -> Self {
        Self {
            session_id,
            state: SessionState::Idle,
        }
    }

    fn advance(&mut self, next: SessionState) -> Result<(), AppError> {
        if !self.state.can_advance_to(next) {
            return Err(AppError::Internal(anyhow::anyhow!(
                "Session {}: illegal transition {:?} -> {:?}",
                self.session_id,
                self.state,
                next
            )));
        }
        debug!("Session {}: {:?} -> {:?}", self.session_id, self.state, next);
        self.state = next;
        Ok(())
    }
}

/// The raw upload, alive for one request.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub filename: String,
    pub bytes: Bytes,
}

/// What the user picked in the action menu.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub action: Option<Action>,
    pub job_role: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActionResult {
    pub action: Action,
    pub heading: &'static str,
    pub outcome: CompletionOutcome,
}

/// Everything the page needs to render after one cycle.
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub session_id: Uuid,
    pub filename: String,
    pub upload_message: String,
    /// Last user-visible state of the cycle.
    pub state: SessionState,
    pub char_count: usize,
    pub chunk_count: usize,
    pub actions: Vec<ActionOption>,
    /// True when Job Matching was picked without a job role.
    pub job_role_required: bool,
    pub result: Option<ActionResult>,
}

pub struct SessionController<'a> {
    llm: &'a CompletionClient,
    temp_dir: &'a Path,
    chunking: ChunkConfig,
}

impl<'a> SessionController<'a> {
    pub fn new(llm: &'a CompletionClient, temp_dir: &'a Path) -> Self {
        Self {
            llm,
            temp_dir,
            chunking: ChunkConfig::default(),
        }
    }

    pub async fn run(
        &self,
        document: UploadedDocument,
        selection: Selection,
    ) -> Result<SessionReport, AppError> {
        let session_id = Uuid::new_v4();
        let mut session = SessionTracker::new(session_id);

        let staged =
            StagedUpload::persist(self.temp_dir, session_id, &document.filename, &document.bytes)?;
        session.advance(SessionState::Uploaded)?;
        info!(
            "Session {session_id}: file '{}' uploaded ({} bytes)",
            document.filename,
            document.bytes.len()
        );

        // PDF parsing is CPU-bound; keep it off the async executor.
        let path = staged.path().to_path_buf();
        let text = tokio::task::spawn_blocking(move || extract_text_from_path(&path))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in extraction: {e}")))??;

        if text.trim().is_empty() {
            session.advance(SessionState::EmptyContent)?;
            warn!("Session {session_id}: no extractable text in '{}'", document.filename);
            return Err(AppError::UnprocessableEntity(EMPTY_CONTENT_MESSAGE.to_string()));
        }
        session.advance(SessionState::TextExtracted)?;

        let chunks = split_text(&text, &self.chunking);
        info!(
            "Session {session_id}: extracted {} chars in {} chunks",
            text.chars().count(),
            chunks.len()
        );
        session.advance(SessionState::AwaitingAction)?;

        let job_role = selection
            .job_role
            .as_deref()
            .filter(|role| !role.trim().is_empty());
        let job_role_required = selection.action == Some(Action::MatchJob) && job_role.is_none();

        let result = match selection.action {
            Some(action) if !job_role_required => {
                session.advance(SessionState::ActionSelected)?;
                let prompt = build_prompt(action, &text, job_role)
                    .map_err(|e| AppError::Validation(e.to_string()))?;

                let outcome = self.llm.complete(&prompt).await;
                session.advance(SessionState::ResultDisplayed)?;
                info!(
                    "Session {session_id}: {} finished (ok: {}, {} chars)",
                    action.label(),
                    outcome.is_ok(),
                    outcome.display_text().len()
                );

                Some(ActionResult {
                    action,
                    heading: action.heading(),
                    outcome,
                })
            }
            _ => None,
        };

        let final_state = session.state;
        staged.remove();
        session.advance(SessionState::Idle)?;

        Ok(SessionReport {
            session_id,
            upload_message: format!("File '{}' uploaded successfully!", document.filename),
            filename: document.filename,
            state: final_state,
            char_count: text.chars().count(),
            chunk_count: chunks.len(),
            actions: action_menu(),
            job_role_required,
            result,
        })
    }
}
