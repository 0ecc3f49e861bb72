use std::io;

use thiserror::Error;

/// Failure to turn a raw listing block into a [`Flat`](crate::models::Flat).
///
/// Only raised when district and title cannot be determined. Missing optional
/// fields never produce an error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FlatError {
    #[error("malformed listing block: expected at least 2 non-empty lines, found {usable_lines}")]
    MalformedInput { usable_lines: usize },
}

/// Errors raised while building or loading a [`BotConfig`](crate::config::BotConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    MissingVar(&'static str),
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
}
