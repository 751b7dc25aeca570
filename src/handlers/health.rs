use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::state::AppState;

// GET /api/health
// Reports integration booleans only, never the secrets themselves.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let config = &state.config;

    let has_ai_key = match config.ai_provider.as_str() {
        "openai" => !config.openai_api_key.is_empty(),
        "groq" => !config.groq_api_key.is_empty(),
        _ => !config.gemini_api_key.is_empty(),
    };

    Json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "env": {
            "ai_provider": config.ai_provider,
            "has_ai_key": has_ai_key,
            "has_elevenlabs": !config.elevenlabs_api_key.is_empty(),
            "has_database": !config.database_url.is_empty(),
        },
    }))
}
