use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::CefrLevel;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestAnswer {
    pub question_id: i64,
    pub question: String,
    pub answer: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// One completed demo-test submission. Written once, never updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestAttempt {
    pub id: String,
    pub test_type: TestType,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
    pub answers: Vec<TestAnswer>,
    pub score_percentage: i64,
    pub cefr_level: CefrLevel,
    pub recommended_course: String,
    pub ai_evaluation: serde_json::Value,
    pub completed_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum TestType {
    Written,
    Listening,
}

impl TestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TestType::Written => "written",
            TestType::Listening => "listening",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "listening" => TestType::Listening,
            _ => TestType::Written,
        }
    }
}
