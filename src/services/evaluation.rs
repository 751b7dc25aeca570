use std::sync::Arc;

use chrono::Utc;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{CefrLevel, Evaluation, TestAnswer, TestAttempt, TestType};
use crate::services::ai::Message;
use crate::state::AppState;

const ASSESSOR_SYSTEM_PROMPT: &str =
    "You are an expert English language assessor. Always respond with valid JSON.";

pub struct EvaluationOutcome {
    pub attempt_id: String,
    pub score: i64,
    pub cefr_level: CefrLevel,
    pub recommended_course: String,
    pub evaluation: Evaluation,
}

/// Runs the AI assessment over the submitted answers and persists the
/// attempt. Nothing is written unless the whole pipeline succeeds.
pub async fn evaluate(
    state: &Arc<AppState>,
    test_type: TestType,
    answers: Vec<TestAnswer>,
    user_name: Option<String>,
    user_email: Option<String>,
) -> Result<EvaluationOutcome, AppError> {
    if answers.is_empty() {
        return Err(AppError::Validation("No answers provided".to_string()));
    }

    let prompt = build_prompt(test_type, &answers);
    let reply = state
        .ai
        .complete(
            ASSESSOR_SYSTEM_PROMPT,
            &[Message {
                role: "user".to_string(),
                content: prompt,
            }],
        )
        .await?;

    let evaluation = extract_evaluation(&reply).ok_or(AppError::EvaluationParse)?;

    let score = evaluation.overall_score.clamp(0, 100);
    let (cefr_level, recommended_course) = cefr_for(score);

    let attempt = TestAttempt {
        id: uuid::Uuid::new_v4().to_string(),
        test_type,
        user_name,
        user_email,
        answers,
        score_percentage: score,
        cefr_level,
        recommended_course: recommended_course.to_string(),
        ai_evaluation: serde_json::to_value(&evaluation)
            .unwrap_or(serde_json::Value::Null),
        completed_at: Utc::now().naive_utc(),
    };

    {
        let db = state.db.lock().unwrap();
        queries::insert_test_attempt(&db, &attempt)?;
    }

    tracing::info!(
        attempt_id = %attempt.id,
        score,
        cefr_level = cefr_level.as_str(),
        "test evaluated"
    );

    Ok(EvaluationOutcome {
        attempt_id: attempt.id,
        score,
        cefr_level,
        recommended_course: recommended_course.to_string(),
        evaluation,
    })
}

/// Canonical score-to-level table: total and non-overlapping over [0,100].
pub fn cefr_for(score: i64) -> (CefrLevel, &'static str) {
    match score.clamp(0, 100) {
        90..=100 => (CefrLevel::C2, "Advanced Mastery"),
        80..=89 => (CefrLevel::C1, "Professional English"),
        70..=79 => (CefrLevel::B2, "Upper Intermediate"),
        60..=69 => (CefrLevel::B1, "Intermediate English"),
        50..=59 => (CefrLevel::A2, "Elementary English"),
        _ => (CefrLevel::A1, "Beginner English"),
    }
}

pub fn build_prompt(test_type: TestType, answers: &[TestAnswer]) -> String {
    let mut prompt = format!(
        "You are an expert English language assessor. Evaluate these {} test answers and provide scores.\n\nTest Answers:\n",
        test_type.as_str()
    );

    for (i, answer) in answers.iter().enumerate() {
        prompt.push_str(&format!(
            "\nQuestion {}: {}\nAnswer: {}\n",
            i + 1,
            answer.question,
            answer.answer
        ));
    }

    prompt.push_str(
        r#"
Provide your evaluation in this exact JSON format:
{
  "scores": [
    { "questionId": 1, "score": 85, "feedback": "Good grammar and vocabulary usage" }
  ],
  "overallScore": 75,
  "strengths": ["Good vocabulary", "Clear structure"],
  "improvements": ["Work on complex sentences", "Practice tenses"],
  "summary": "Overall assessment summary here"
}

Score each answer 0-100 based on:
- Grammar accuracy (25%)
- Vocabulary usage (25%)
- Coherence and relevance (25%)
- Communication effectiveness (25%)

Be constructive and encouraging in feedback."#,
    );

    prompt
}

/// Best-effort structured extraction: models wrap the JSON in prose or
/// markdown fences often enough that all three shapes must be tried.
pub fn extract_evaluation(response: &str) -> Option<Evaluation> {
    if let Ok(evaluation) = serde_json::from_str::<Evaluation>(response) {
        return Some(evaluation);
    }

    let cleaned = response.trim();
    let cleaned = cleaned
        .strip_prefix("```json")
        .or_else(|| cleaned.strip_prefix("```"))
        .unwrap_or(cleaned);
    let cleaned = cleaned.strip_suffix("```").unwrap_or(cleaned).trim();

    if let Ok(evaluation) = serde_json::from_str::<Evaluation>(cleaned) {
        return Some(evaluation);
    }

    let start = cleaned.find('{')?;
    let end = cleaned.rfind('}')?;
    serde_json::from_str::<Evaluation>(&cleaned[start..=end]).ok()
}
