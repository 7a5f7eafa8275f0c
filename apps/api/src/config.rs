use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::parsing::strategy::DEFAULT_ATTEMPT_TIMEOUT;
use crate::parsing::validation::MAX_FILE_SIZE;
use crate::parsing::ParserLimits;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub max_upload_bytes: usize,
    pub pdf_attempt_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: env_or("PORT", 8080).context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            max_upload_bytes: env_or("MAX_UPLOAD_BYTES", MAX_FILE_SIZE)
                .context("MAX_UPLOAD_BYTES must be a byte count")?,
            pdf_attempt_timeout_secs: env_or(
                "PDF_ATTEMPT_TIMEOUT_SECS",
                DEFAULT_ATTEMPT_TIMEOUT.as_secs(),
            )
            .context("PDF_ATTEMPT_TIMEOUT_SECS must be a whole number of seconds")?,
        })
    }

    pub fn parser_limits(&self) -> ParserLimits {
        ParserLimits {
            max_file_size: self.max_upload_bytes,
            pdf_attempt_timeout: Duration::from_secs(self.pdf_attempt_timeout_secs),
        }
    }

    /// Request body cap: the upload ceiling plus room for multipart framing, so
    /// oversized files reach the validator and get its message instead of a bare 413.
    pub fn body_limit(&self) -> usize {
        self.max_upload_bytes + 1024 * 1024
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            max_upload_bytes: MAX_FILE_SIZE,
            pdf_attempt_timeout_secs: DEFAULT_ATTEMPT_TIMEOUT.as_secs(),
        }
    }
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Invalid value '{raw}' for '{key}'")),
        Err(_) => Ok(default),
    }
}
