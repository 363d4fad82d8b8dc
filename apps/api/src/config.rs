use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable is optional; unparsable values abort startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Simulated latency between job submission and the analysis result.
    pub analysis_delay: Duration,
    /// Simulated "assistant is composing" latency.
    pub chat_reply_delay: Duration,
    pub max_upload_bytes: usize,
    /// Overrides the built-in content catalog.
    pub catalog_path: Option<PathBuf>,
    /// Seeds the shared RNG for reproducible runs.
    pub rng_seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            analysis_delay: Duration::from_millis(3_000),
            chat_reply_delay: Duration::from_millis(1_500),
            max_upload_bytes: 10 * 1024 * 1024,
            catalog_path: None,
            rng_seed: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            port: parse_env("PORT")?.unwrap_or(defaults.port),
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            analysis_delay: parse_env("ANALYSIS_DELAY_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.analysis_delay),
            chat_reply_delay: parse_env("CHAT_REPLY_DELAY_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.chat_reply_delay),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES")?.unwrap_or(defaults.max_upload_bytes),
            catalog_path: std::env::var_os("CATALOG_PATH").map(PathBuf::from),
            rng_seed: parse_env("RNG_SEED")?,
        })
    }
}

fn parse_env<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        Err(_) => Ok(None),
    }
}
