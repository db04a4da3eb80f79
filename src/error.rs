use thiserror::Error;

use crate::decode::DecodeError;

#[derive(Debug, Error)]
pub enum AppError {
    /// Non-2xx answer from the ledger backend. `context` is "API" for the
    /// ledger endpoint and "Verify" for chain verification.
    #[error("{context} error: {status}")]
    Http { context: &'static str, status: u16 },

    #[error("HTTP request error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Data unavailable")]
    MissingData,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
