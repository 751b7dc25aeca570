pub mod elevenlabs;

use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum TtsError {
    #[error("ELEVENLABS_API_KEY is not configured")]
    MissingKey,

    #[error("ElevenLabs API error: {0}")]
    Upstream(u16),

    #[error("failed to call ElevenLabs API: {0}")]
    Request(#[from] reqwest::Error),
}

#[async_trait]
pub trait SpeechProvider: Send + Sync {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, TtsError>;
}
