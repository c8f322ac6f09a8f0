/// LLM Client — the single point of entry for chat-completion calls.
///
/// One prompt in, one request out: no retries, no streaming, and the
/// transport's default timeout. Every failure is folded into a
/// `CompletionOutcome::Err` so callers always get something to display.
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::CompletionConfig;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API key is missing. Please set the GROQCLOUD_API_KEY environment variable.")]
    MissingApiKey,

    #[error("Error calling GroqCloud: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Error calling GroqCloud: API returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Error calling GroqCloud: malformed response body: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Error calling GroqCloud: response contained no choices")]
    EmptyChoices,
}

/// Result of a completion call, tagged so callers can render failures
/// differently from model output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CompletionOutcome {
    Ok { text: String },
    #[serde(rename = "error")]
    Err { reason: String },
}

impl CompletionOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, CompletionOutcome::Ok { .. })
    }

    /// The displayable text, whichever variant this is.
    pub fn display_text(&self) -> &str {
        match self {
            CompletionOutcome::Ok { text } => text,
            CompletionOutcome::Err { reason } => reason,
        }
    }
}

impl From<Result<String, LlmError>> for CompletionOutcome {
    fn from(result: Result<String, LlmError>) -> Self {
        match result {
            Ok(text) => CompletionOutcome::Ok { text },
            Err(e) => CompletionOutcome::Err {
                reason: e.to_string(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Chat-completion client. Cheap to clone; the credential and endpoint are
/// fixed at construction.
#[derive(Clone)]
pub struct CompletionClient {
    client: Client,
    config: CompletionConfig,
}

impl CompletionClient {
    pub fn new(config: CompletionConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Sends `prompt` and returns the outcome. Never fails.
    pub async fn complete(&self, prompt: &str) -> CompletionOutcome {
        let result = self.try_complete(prompt).await;
        match &result {
            Ok(text) => info!("Completion succeeded ({} chars)", text.len()),
            Err(e) => warn!("Completion failed: {e}"),
        }
        result.into()
    }

    /// Sends `prompt` and returns `choices[0].message.content`.
    pub async fn try_complete(&self, prompt: &str) -> Result<String, LlmError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(LlmError::MissingApiKey)?;

        let request_body = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        debug!(
            "Sending completion request: model={}, prompt_chars={}",
            self.config.model,
            prompt.len()
        );

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // Try to parse error message
            let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatResponse = serde_json::from_str(&body)?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(LlmError::EmptyChoices)
    }
}
