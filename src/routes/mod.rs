// src/routes/mod.rs
pub mod chat;

use crate::state::SharedState;
use axum::{
    Router,
    routing::{get, post},
};
use chat::{chat_handler, demo_info_handler, health_handler};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub fn create_router() -> Router<SharedState> {
    Router::new()
        .route("/chat", post(chat_handler))
        .route("/health", get(health_handler))
        .route("/demo-info", get(demo_info_handler))
        // Landing page and assets; `/` resolves to public/index.html.
        .fallback_service(ServeDir::new("public"))
        .layer(TraceLayer::new_for_http())
}
