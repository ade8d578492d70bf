use std::sync::Arc;

use gemini_gateway::{config::Config, routes, state::AppState};
use tower_http::cors::CorsLayer;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env();
    let addr = config.server_addr();
    if config.gemini_api_key.is_none() {
        info!("no GEMINI_API_KEY configured; callers must supply their own key");
    }

    let state = Arc::new(AppState::new(config));

    // The web UI may be served from anywhere, so allow all origins.
    let cors = CorsLayer::very_permissive();

    let app = routes::create_router().with_state(state).layer(cors);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Gemini gateway running at http://{addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
