use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use base64::Engine;
use serde::Deserialize;

use crate::errors::AppError;
use crate::services::scripts;
use crate::state::AppState;

// POST /api/generate-listening-audio
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioRequest {
    pub question_id: i64,
}

pub async fn generate_audio(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AudioRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let script = scripts::script_for(body.question_id)
        .ok_or_else(|| AppError::Validation("Invalid question ID".to_string()))?;

    tracing::info!(question_id = body.question_id, "generating listening audio");

    let audio = state.tts.synthesize(script).await?;
    let encoded = base64::engine::general_purpose::STANDARD.encode(&audio);

    Ok(Json(serde_json::json!({
        "audioContent": encoded,
        "transcript": script,
    })))
}
