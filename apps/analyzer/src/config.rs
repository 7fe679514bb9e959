use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_SERVICE_URL: &str = "http://localhost:8000";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub service_url: String,
    pub service_timeout_secs: Option<u64>,
    pub port: u16,
    pub max_upload_bytes: usize,
    pub rust_log: String,
}

/// What the orchestrator needs at construction: where the remote services live,
/// and an optional timeout layered onto every remote call.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub base_address: String,
    pub request_timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            service_url: env_or("ANALYSIS_SERVICE_URL", DEFAULT_SERVICE_URL),
            service_timeout_secs: parse_timeout_secs(optional_env("SERVICE_TIMEOUT_SECS"))?,
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            max_upload_bytes: optional_env("MAX_UPLOAD_BYTES")
                .map(|v| v.parse::<usize>())
                .transpose()
                .context("MAX_UPLOAD_BYTES must be a byte count")?
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            rust_log: env_or("RUST_LOG", "info"),
        })
    }

    pub fn pipeline(&self) -> PipelineConfig {
        PipelineConfig {
            base_address: self.service_url.trim_end_matches('/').to_string(),
            request_timeout: self.service_timeout_secs.map(Duration::from_secs),
        }
    }
}

/// Unset means no timeout. Zero is rejected: it would time out every remote call.
fn parse_timeout_secs(raw: Option<String>) -> Result<Option<u64>> {
    let secs = raw
        .map(|v| v.trim().parse::<u64>())
        .transpose()
        .context("SERVICE_TIMEOUT_SECS must be a whole number of seconds")?;
    anyhow::ensure!(secs != Some(0), "SERVICE_TIMEOUT_SECS must be greater than zero");
    Ok(secs)
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    optional_env(key).unwrap_or_else(|| default.to_string())
}
