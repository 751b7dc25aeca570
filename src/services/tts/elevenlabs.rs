use async_trait::async_trait;
use serde_json::json;

use super::{SpeechProvider, TtsError};

// Sarah voice, clear female voice.
const VOICE_ID: &str = "EXAVITQu4vr4xnSDxMaL";

pub struct ElevenLabsProvider {
    api_key: String,
    client: reqwest::Client,
}

impl ElevenLabsProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl SpeechProvider for ElevenLabsProvider {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, TtsError> {
        if self.api_key.is_empty() {
            return Err(TtsError::MissingKey);
        }

        let url = format!("https://api.elevenlabs.io/v1/text-to-speech/{VOICE_ID}");

        let body = json!({
            "text": text,
            "model_id": "eleven_turbo_v2_5",
            "output_format": "mp3_44100_128",
            "voice_settings": {
                "stability": 0.6,
                "similarity_boost": 0.75,
                "style": 0.3,
                "speed": 0.9, // slightly slower for learners
            },
        });

        let resp = self
            .client
            .post(&url)
            .header("xi-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            tracing::error!(status = %status, detail = %detail, "speech synthesis failed");
            return Err(TtsError::Upstream(status.as_u16()));
        }

        Ok(resp.bytes().await?.to_vec())
    }
}
