//! AI Review Gateway daemon.
//!
//! Receives candidate entity pairs from the upstream resolution pipeline and
//! asks a hosted LLM whether they refer to the same real-world entity.

use anyhow::{Context, Result};
use review_common::GatewayConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = GatewayConfig::from_env().context("failed to load gateway configuration")?;
    info!(
        "ai-review-gateway v{} starting (model: {})",
        env!("CARGO_PKG_VERSION"),
        config.model
    );

    reviewd::server::run(config).await
}
