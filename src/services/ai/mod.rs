pub mod gemini;
pub mod openai;

use std::pin::Pin;

use async_trait::async_trait;
use axum::body::Bytes;
use serde::{Deserialize, Serialize};
use tokio_stream::Stream;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

/// Chunks already framed as SSE `data:` lines, ending with `data: [DONE]`,
/// ready to relay to the browser untouched.
pub type SseStream = Pin<Box<dyn Stream<Item = Bytes> + Send>>;

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("{0} is not configured")]
    MissingKey(&'static str),

    #[error("Rate limits exceeded, please try again later.")]
    RateLimited,

    #[error("AI credits exhausted, please try again later.")]
    QuotaExhausted,

    #[error("AI service error ({0})")]
    Upstream(u16),

    #[error("failed to call AI service: {0}")]
    Request(#[from] reqwest::Error),

    #[error("missing content in AI response")]
    EmptyResponse,
}

impl AiError {
    pub(crate) fn from_status(status: u16) -> Self {
        match status {
            429 => AiError::RateLimited,
            402 => AiError::QuotaExhausted,
            s => AiError::Upstream(s),
        }
    }
}

#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Single-shot completion returning the full reply text.
    async fn complete(&self, system_prompt: &str, messages: &[Message]) -> Result<String, AiError>;

    /// Streaming completion. Fails before any frame is produced, or not at
    /// all; mid-stream upstream hiccups are dropped, never reported.
    async fn stream(&self, system_prompt: &str, messages: &[Message])
        -> Result<SseStream, AiError>;
}
