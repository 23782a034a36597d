//! Error types for smokecheck

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SmokeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid URL for {field}: {value}")]
    InvalidUrl { field: &'static str, value: String },
}

pub type SmokeResult<T> = Result<T, SmokeError>;
