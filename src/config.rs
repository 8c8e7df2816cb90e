use anyhow::{Context, Result};
use std::time::Duration;

pub const DEFAULT_DESCRIBE_BASE_URL: &str = "https://pokeapi.co/api/v2/pokemon-species/";
pub const DEFAULT_TRANSLATE_URL: &str = "https://api.funtranslations.com/translate/shakespeare.json";

/// How long to wait for an upstream host to reply, in seconds
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone)]
pub struct Config {
    // Reference service (subject name is appended verbatim)
    pub describe_base_url: String,

    // Rewrite service
    pub translate_url: String,

    // Applies to each outbound call, connect through body
    pub upstream_timeout: Duration,

    // Inbound listener
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let timeout_secs: u64 = match std::env::var("UPSTREAM_TIMEOUT_SECS") {
            Ok(v) => v
                .parse()
                .with_context(|| format!("UPSTREAM_TIMEOUT_SECS is not a number: {}", v))?,
            Err(_) => DEFAULT_UPSTREAM_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            anyhow::bail!("UPSTREAM_TIMEOUT_SECS must be greater than zero");
        }

        let port: u16 = match std::env::var("PORT") {
            Ok(v) => v
                .parse()
                .with_context(|| format!("PORT is not a valid port number: {}", v))?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            describe_base_url: std::env::var("DESCRIBE_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_DESCRIBE_BASE_URL.to_string()),
            translate_url: std::env::var("TRANSLATE_URL")
                .unwrap_or_else(|_| DEFAULT_TRANSLATE_URL.to_string()),
            upstream_timeout: Duration::from_secs(timeout_secs),
            port,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            describe_base_url: DEFAULT_DESCRIBE_BASE_URL.to_string(),
            translate_url: DEFAULT_TRANSLATE_URL.to_string(),
            upstream_timeout: Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
            port: DEFAULT_PORT,
        }
    }
}
