use async_trait::async_trait;
use serde_json::json;
use tokio_stream::StreamExt;

use super::{AiError, AiProvider, Message, SseStream};

/// Chat-completions backend for any OpenAI-compatible API. OpenAI and Groq
/// differ only in endpoint, model, and which env var supplies the key.
pub struct OpenAiCompatProvider {
    api_key: String,
    key_var: &'static str,
    url: &'static str,
    model: &'static str,
    client: reqwest::Client,
}

impl OpenAiCompatProvider {
    pub fn openai(api_key: String) -> Self {
        Self::new(
            api_key,
            "OPENAI_API_KEY",
            "https://api.openai.com/v1/chat/completions",
            "gpt-3.5-turbo",
        )
    }

    pub fn groq(api_key: String) -> Self {
        Self::new(
            api_key,
            "GROQ_API_KEY",
            "https://api.groq.com/openai/v1/chat/completions",
            "llama-3.1-70b-versatile",
        )
    }

    fn new(api_key: String, key_var: &'static str, url: &'static str, model: &'static str) -> Self {
        Self {
            api_key,
            key_var,
            url,
            model,
            client: reqwest::Client::new(),
        }
    }

    fn check_key(&self) -> Result<(), AiError> {
        if self.api_key.is_empty() {
            return Err(AiError::MissingKey(self.key_var));
        }
        Ok(())
    }

    fn chat_messages(system_prompt: &str, messages: &[Message]) -> Vec<serde_json::Value> {
        let mut chat_messages = vec![json!({
            "role": "system",
            "content": system_prompt,
        })];

        for msg in messages {
            chat_messages.push(json!({
                "role": msg.role,
                "content": msg.content,
            }));
        }

        chat_messages
    }
}

#[async_trait]
impl AiProvider for OpenAiCompatProvider {
    async fn complete(&self, system_prompt: &str, messages: &[Message]) -> Result<String, AiError> {
        self.check_key()?;

        let body = json!({
            "model": self.model,
            "messages": Self::chat_messages(system_prompt, messages),
            "temperature": 0.3,
            "max_tokens": 2048,
        });

        let resp = self
            .client
            .post(self.url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            tracing::error!(status = %status, detail = %detail, "chat completion failed");
            return Err(AiError::from_status(status.as_u16()));
        }

        let data: serde_json::Value = resp.json().await?;
        data["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or(AiError::EmptyResponse)
    }

    async fn stream(
        &self,
        system_prompt: &str,
        messages: &[Message],
    ) -> Result<SseStream, AiError> {
        self.check_key()?;

        let body = json!({
            "model": self.model,
            "messages": Self::chat_messages(system_prompt, messages),
            "stream": true,
            "temperature": 0.7,
            "max_tokens": 1024,
        });

        let resp = self
            .client
            .post(self.url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            tracing::error!(status = %status, detail = %detail, "chat stream request failed");
            return Err(AiError::from_status(status.as_u16()));
        }

        // Upstream already speaks `data: {...}` / `data: [DONE]` framing, so
        // the bytes pass through untouched.
        let stream = resp.bytes_stream().filter_map(|chunk| match chunk {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                tracing::warn!(error = %e, "dropping broken chunk from upstream stream");
                None
            }
        });

        Ok(Box::pin(stream))
    }
}
