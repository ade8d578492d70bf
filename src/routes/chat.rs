use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::{
    error::AppError,
    message::{ChatRequest, ChatResponse, ChatStatus, HealthResponse},
    services::chatbot::{MISSING_KEY_MESSAGE, build_prompt, resolve_api_key},
    state::SharedState,
};

pub async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    // Key from the request body wins over the one configured at startup.
    let Some(api_key) = resolve_api_key(
        payload.api_key.as_deref(),
        state.config.gemini_api_key.as_deref(),
    ) else {
        // No usable key is an expected condition, delivered as a normal
        // response with an error payload rather than an HTTP failure.
        return Ok(Json(ChatResponse {
            response: MISSING_KEY_MESSAGE.to_string(),
            status: ChatStatus::Error,
        }));
    };

    let prompt = build_prompt(&payload.message);
    let text = state.gemini.generate(&api_key, &prompt).await?;

    Ok(Json(ChatResponse {
        response: text,
        status: ChatStatus::Success,
    }))
}

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        message: "Gemini gateway is running!".to_string(),
    })
}

pub async fn demo_info_handler() -> Json<Value> {
    Json(json!({
        "project_name": "Gemini AI Assistant for Social Good",
        "features": [
            "Single-turn chat backed by Gemini",
            "Bring-your-own API key with an environment fallback",
            "Interactive web interface",
            "RESTful API architecture",
        ],
        "tech_stack": {
            "backend": ["Rust", "axum", "reqwest", "tokio"],
            "frontend": ["HTML5", "Vanilla JavaScript"],
        },
    }))
}
