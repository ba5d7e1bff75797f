use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures inside the navigation pipeline. None of them is fatal; the
/// navigator turns every variant into a notice for the client.
#[derive(Debug, Error)]
pub enum NavError {
    #[error("malformed token: {0}")]
    MalformedToken(String),
    #[error("catalog data unavailable")]
    DataUnavailable(#[source] anyhow::Error),
}

impl NavError {
    pub fn malformed(raw: impl Into<String>) -> Self {
        Self::MalformedToken(raw.into())
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::DataUnavailable(_))
    }
}

impl From<anyhow::Error> for NavError {
    fn from(value: anyhow::Error) -> Self {
        Self::DataUnavailable(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Unavailable,
}

/// Error body returned by the HTTP adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}
