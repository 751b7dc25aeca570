use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::config::AppConfig;
use crate::services::ai::AiProvider;
use crate::services::tts::SpeechProvider;

pub struct AppState {
    pub db: Arc<Mutex<Connection>>,
    pub config: AppConfig,
    pub ai: Box<dyn AiProvider>,
    pub tts: Box<dyn SpeechProvider>,
}
