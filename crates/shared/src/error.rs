use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Unauthorized,
    Forbidden,
    NotFound,
    Validation,
    RateLimited,
    Internal,
}

impl ErrorCode {
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            400 | 409 | 422 => Self::Validation,
            429 => Self::RateLimited,
            _ => Self::Internal,
        }
    }
}

/// A non-success reply from the platform API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{code:?}{}: {message}", remote_suffix(.remote_code))]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
    /// The platform's own error code, e.g. `forbidden` or `bad_request`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_code: Option<String>,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            remote_code: None,
        }
    }

    pub fn with_remote_code(mut self, remote_code: impl Into<String>) -> Self {
        self.remote_code = Some(remote_code.into());
        self
    }
}

fn remote_suffix(remote_code: &Option<String>) -> String {
    remote_code
        .as_deref()
        .map(|remote| format!(" ({remote})"))
        .unwrap_or_default()
}

/// Raised when an API response does not have the expected shape.
///
/// Every variant except `Syntax` names the offending value by its JSON path,
/// for example `$.projects[2].accountId`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("response is not valid JSON: {0}")]
    Syntax(String),
    #[error("{path}: missing required field")]
    MissingField { path: String },
    #[error("{path}: {message}")]
    Invalid { path: String, message: String },
}

impl DecodeError {
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Syntax(_) => None,
            Self::MissingField { path } | Self::Invalid { path, .. } => Some(path),
        }
    }
}

/// Rejections of the create-drain form before anything is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("URL must be an absolute http(s) address: {0}")]
    InvalidUrl(String),
}

#[cfg(test)]
#[path = "tests/error_tests.rs"]
mod tests;
