use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 120;
const SESSION_FILE_NAME: &str = "screener-session.json";

/// Client configuration loaded from environment variables.
/// Every variable has a default, so a bare environment is valid.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub session_file: PathBuf,
    pub download_dir: PathBuf,
    pub request_timeout: Duration,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable lookup.
    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout_secs = match var("SCREENER_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .with_context(|| {
                    format!("SCREENER_TIMEOUT_SECS must be a positive integer, got '{raw}'")
                })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Config {
            api_url: var("SCREENER_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            session_file: var("SCREENER_SESSION_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| std::env::temp_dir().join(SESSION_FILE_NAME)),
            download_dir: var("SCREENER_DOWNLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            request_timeout: Duration::from_secs(timeout_secs),
            rust_log: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}
