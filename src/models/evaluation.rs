use serde::{Deserialize, Serialize};

/// The structured payload the AI assessor is asked to produce.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub scores: Vec<QuestionScore>,
    pub overall_score: i64,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub improvements: Vec<String>,
    #[serde(default)]
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionScore {
    pub question_id: i64,
    pub score: i64,
    #[serde(default)]
    pub feedback: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CefrLevel {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
}

impl CefrLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CefrLevel::A1 => "A1",
            CefrLevel::A2 => "A2",
            CefrLevel::B1 => "B1",
            CefrLevel::B2 => "B2",
            CefrLevel::C1 => "C1",
            CefrLevel::C2 => "C2",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "A2" => CefrLevel::A2,
            "B1" => CefrLevel::B1,
            "B2" => CefrLevel::B2,
            "C1" => CefrLevel::C1,
            "C2" => CefrLevel::C2,
            _ => CefrLevel::A1,
        }
    }
}
