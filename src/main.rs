use anyhow::{Context, Result};
use rewrite_gateway::{config::Config, pipeline::Pipeline, server};
use std::net::SocketAddr;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("rewrite_gateway=info".parse()?)
        )
        .init();

    info!("Starting rewrite gateway");

    // Load configuration from environment
    let config = Config::from_env()?;
    info!("Reference service: {}", config.describe_base_url);
    info!("Rewrite service: {}", config.translate_url);
    info!("Upstream timeout: {}s", config.upstream_timeout.as_secs());

    let app = server::router(Pipeline::from_config(&config));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
