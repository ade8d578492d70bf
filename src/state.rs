// src/state.rs
use std::sync::Arc;

use crate::config::Config;
use crate::services::gemini::{GEMINI_MODEL, GeminiClient};

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: Config,
    pub gemini: GeminiClient,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            gemini: GeminiClient::new(GEMINI_MODEL),
        }
    }
}
