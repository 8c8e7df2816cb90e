//! Describe binary - runs the pipeline once for a subject and prints the reply
//!
//! Usage:
//!   cargo run --bin describe -- Sparky
//!
//! Uses the same environment variables as the server (all optional):
//! - DESCRIBE_BASE_URL
//! - TRANSLATE_URL
//! - UPSTREAM_TIMEOUT_SECS

use anyhow::{Context, Result};
use rewrite_gateway::{config::Config, pipeline::Pipeline};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize logging (stderr, so stdout stays pure JSON)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("rewrite_gateway=info".parse()?)
                .add_directive("describe=info".parse()?)
        )
        .init();

    let subject = std::env::args()
        .nth(1)
        .context("Usage: describe <subject-name>")?;

    let config = Config::from_env()?;
    info!("Describing '{}' via {}", subject, config.describe_base_url);

    let reply = Pipeline::from_config(&config).handle(&subject).await;

    let json = serde_json::to_string_pretty(&reply).context("Failed to serialize reply")?;
    println!("{}", json);

    if !reply.result.success {
        std::process::exit(1);
    }

    Ok(())
}
