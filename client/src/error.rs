use plasma_common::config::ConfigError;
use plasma_common::PlasmaError;
use thiserror::Error;

/// Errors surfaced by the command-line client
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid hex input: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("Codec error: {0}")]
    Codec(#[from] PlasmaError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Output error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;
