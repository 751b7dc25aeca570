use std::sync::{Arc, Mutex};

use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use academy_api::config::AppConfig;
use academy_api::db;
use academy_api::handlers;
use academy_api::services::ai::gemini::GeminiProvider;
use academy_api::services::ai::openai::OpenAiCompatProvider;
use academy_api::services::ai::AiProvider;
use academy_api::services::tts::elevenlabs::ElevenLabsProvider;
use academy_api::services::tts::SpeechProvider;
use academy_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let conn = db::init_db(&config.database_url)?;

    let ai: Box<dyn AiProvider> = match config.ai_provider.as_str() {
        "openai" => {
            tracing::info!("using OpenAI chat backend");
            Box::new(OpenAiCompatProvider::openai(config.openai_api_key.clone()))
        }
        "groq" => {
            tracing::info!("using Groq chat backend");
            Box::new(OpenAiCompatProvider::groq(config.groq_api_key.clone()))
        }
        _ => {
            tracing::info!("using Gemini chat backend");
            Box::new(GeminiProvider::new(config.gemini_api_key.clone()))
        }
    };

    let tts: Box<dyn SpeechProvider> =
        Box::new(ElevenLabsProvider::new(config.elevenlabs_api_key.clone()));

    let state = Arc::new(AppState {
        db: Arc::new(Mutex::new(conn)),
        config: config.clone(),
        ai,
        tts,
    });

    let cors = CorsLayer::new()
        .allow_origin(config.cors_origin.parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let app = Router::new()
        .route("/api/health", get(handlers::health::health))
        .route(
            "/api/book-trial",
            get(handlers::booking::list_slots).post(handlers::booking::create_booking),
        )
        .route("/api/evaluate-test", post(handlers::evaluate::evaluate_test))
        .route("/api/laila-chat", post(handlers::chat::chat))
        .route(
            "/api/generate-listening-audio",
            post(handlers::audio::generate_audio),
        )
        .fallback(handlers::not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
