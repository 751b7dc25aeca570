use std::convert::Infallible;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::header;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use tokio_stream::StreamExt;

use crate::errors::AppError;
use crate::services::ai::Message;
use crate::services::chat;
use crate::state::AppState;

// POST /api/laila-chat
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default = "default_language")]
    pub language: String,
    pub user_name: Option<String>,
}

fn default_language() -> String {
    "en".to_string()
}

/// Transparent relay: once the upstream call is accepted the frames flow
/// straight through, and a client disconnect simply drops the stream.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ChatRequest>,
) -> Result<Response, AppError> {
    let system_prompt = chat::system_prompt(&body.language, body.user_name.as_deref());

    let stream = state.ai.stream(&system_prompt, &body.messages).await?;

    let response = Response::builder()
        .header(header::CONTENT_TYPE, "text/event-stream")
        .header(header::CACHE_CONTROL, "no-cache")
        .body(Body::from_stream(stream.map(Ok::<_, Infallible>)))
        .map_err(|e| AppError::Internal(e.into()))?;

    Ok(response)
}
