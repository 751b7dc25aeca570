use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::{TestAnswer, TestType};
use crate::services::evaluation;
use crate::state::AppState;

// POST /api/evaluate-test
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateRequest {
    #[serde(default)]
    pub answers: Vec<TestAnswer>,
    pub test_type: TestType,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
}

pub async fn evaluate_test(
    State(state): State<Arc<AppState>>,
    Json(body): Json<EvaluateRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let outcome = evaluation::evaluate(
        &state,
        body.test_type,
        body.answers,
        body.user_name,
        body.user_email,
    )
    .await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "attemptId": outcome.attempt_id,
        "score": outcome.score,
        "cefrLevel": outcome.cefr_level,
        "recommendedCourse": outcome.recommended_course,
        "evaluation": outcome.evaluation,
    })))
}
