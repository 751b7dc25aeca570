use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub ai_provider: String,
    pub gemini_api_key: String,
    pub openai_api_key: String,
    pub groq_api_key: String,
    pub elevenlabs_api_key: String,
    pub cors_origin: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3001),
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "academy.db".to_string()),
            ai_provider: env::var("AI_PROVIDER").unwrap_or_else(|_| "gemini".to_string()),
            gemini_api_key: env::var("GEMINI_API_KEY").unwrap_or_default(),
            openai_api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
            groq_api_key: env::var("GROQ_API_KEY").unwrap_or_default(),
            elevenlabs_api_key: env::var("ELEVENLABS_API_KEY").unwrap_or_default(),
            cors_origin: env::var("CORS_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
        }
    }
}
