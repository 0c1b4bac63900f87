//! HTTP server implementation

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use super::handlers::{health_handler, webhook_handler, AppState};

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", post(webhook_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Run the web server
pub async fn run_web_server(addr: &str, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = router(state);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Karma webhook listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
