//! Errors surfaced at the process boundary (protocol, import/export, config).

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Error, Debug)]
pub enum CoreError {
    /// Request payload is missing a field or has the wrong shape
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    #[error("unknown row: {0}")]
    UnknownRow(String),

    #[error("unknown culture: {0}")]
    UnknownCulture(String),

    #[error("unknown language: {0}")]
    UnknownLanguage(String),

    /// Page size outside the configured options
    #[error("invalid page size: {0}")]
    InvalidPageSize(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Import file could not be decoded as text
    #[error("decode error: {0}")]
    Decode(String),

    #[error("config error: {0}")]
    Config(String),
}

impl CoreError {
    pub fn invalid_payload(msg: impl Into<String>) -> Self {
        Self::InvalidPayload(msg.into())
    }

    pub fn unknown_row(id: impl Into<String>) -> Self {
        Self::UnknownRow(id.into())
    }

    pub fn unknown_culture(id: impl Into<String>) -> Self {
        Self::UnknownCulture(id.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
