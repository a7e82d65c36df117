//! CLI errors.

use salesboard_chat::ChatError;
use salesboard_core::{ConfigError, QueryError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Query(#[from] QueryError),

    #[error("{0}")]
    Chat(#[from] ChatError),

    #[error("Config: {0}")]
    Config(#[from] ConfigError),

    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Usage(String),
}
