use async_trait::async_trait;
use axum::body::Bytes;
use serde_json::json;

use super::{AiError, AiProvider, Message, SseStream};

pub struct GeminiProvider {
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl GeminiProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            model: "gemini-1.5-flash".to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn check_key(&self) -> Result<(), AiError> {
        if self.api_key.is_empty() {
            return Err(AiError::MissingKey("GEMINI_API_KEY"));
        }
        Ok(())
    }

    // Gemini has no system role; the prompt goes in as an opening user turn
    // with a canned model acknowledgement.
    fn contents(system_prompt: &str, messages: &[Message]) -> Vec<serde_json::Value> {
        let mut contents = vec![
            json!({ "role": "user", "parts": [{ "text": system_prompt }] }),
            json!({ "role": "model", "parts": [{ "text": "Understood! I am ready to help." }] }),
        ];

        for msg in messages {
            let role = if msg.role == "assistant" { "model" } else { "user" };
            contents.push(json!({ "role": role, "parts": [{ "text": msg.content }] }));
        }

        contents
    }
}

#[async_trait]
impl AiProvider for GeminiProvider {
    async fn complete(&self, system_prompt: &str, messages: &[Message]) -> Result<String, AiError> {
        self.check_key()?;

        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.model, self.api_key
        );

        let body = json!({
            "contents": Self::contents(system_prompt, messages),
            "generationConfig": {
                "temperature": 0.3,
                "maxOutputTokens": 2048,
            },
        });

        let resp = self.client.post(&url).json(&body).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            tracing::error!(status = %status, detail = %detail, "Gemini request failed");
            return Err(AiError::from_status(status.as_u16()));
        }

        let data: serde_json::Value = resp.json().await?;
        data["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or(AiError::EmptyResponse)
    }

    async fn stream(
        &self,
        system_prompt: &str,
        messages: &[Message],
    ) -> Result<SseStream, AiError> {
        // No OpenAI-style SSE on this backend; fetch the full reply and feed
        // it out word by word in the same framing the other providers relay.
        let text = self.complete(system_prompt, messages).await?;

        let mut frames: Vec<Bytes> = text
            .split(' ')
            .map(|word| {
                let payload = json!({ "choices": [{ "delta": { "content": format!("{word} ") } }] });
                Bytes::from(format!("data: {payload}\n\n"))
            })
            .collect();
        frames.push(Bytes::from_static(b"data: [DONE]\n\n"));

        Ok(Box::pin(tokio_stream::iter(frames)))
    }
}
