use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_PARSE_TIMEOUT_SECS: u64 = 60;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the external resume/JD parse service.
    pub parser_url: String,
    pub parse_timeout: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let parse_timeout_secs = match std::env::var("PARSE_TIMEOUT_SECS") {
            Ok(raw) => parse_timeout_secs(&raw)?,
            Err(_) => DEFAULT_PARSE_TIMEOUT_SECS,
        };

        Ok(Config {
            parser_url: require_env("PARSER_URL")?,
            parse_timeout: Duration::from_secs(parse_timeout_secs),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_timeout_secs(raw: &str) -> Result<u64> {
    let secs = raw
        .trim()
        .parse::<u64>()
        .context("PARSE_TIMEOUT_SECS must be a whole number of seconds")?;
    anyhow::ensure!(secs > 0, "PARSE_TIMEOUT_SECS must be greater than zero");
    Ok(secs)
}
