//! HTTP server for reviewd.

use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use review_common::GatewayConfig;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::reviewer::MergeReviewer;
use crate::routes;

/// Application state shared across handlers. The gateway is stateless apart
/// from the reviewer's HTTP client; nothing here outlives a request.
pub struct AppState {
    pub reviewer: MergeReviewer,
}

impl AppState {
    pub fn new(reviewer: MergeReviewer) -> Self {
        Self { reviewer }
    }
}

/// Build the router with tracing and a permissive CORS policy on every
/// response (preflight included).
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::routes())
        .with_state(Arc::new(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Run the HTTP server.
pub async fn run(config: GatewayConfig) -> Result<()> {
    let reviewer = MergeReviewer::from_config(&config);
    let router = app(AppState::new(reviewer));

    let listener = tokio::net::TcpListener::bind(&config.bind).await?;
    info!("  Listening on http://{}", config.bind);

    axum::serve(listener, router).await?;
    Ok(())
}
