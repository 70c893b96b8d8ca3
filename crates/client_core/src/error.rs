use reqwest::StatusCode;
use shared::error::{ApiError, DecodeError, ErrorCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{endpoint}: request failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint}: server returned {status}: {error}")]
    Api {
        endpoint: &'static str,
        status: StatusCode,
        error: ApiError,
    },
    #[error("{endpoint}: unexpected response shape: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: DecodeError,
    },
    #[error("oauth client id/secret are not configured")]
    OAuthNotConfigured,
    #[error("invalid api url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ClientError {
    pub fn api_code(&self) -> Option<ErrorCode> {
        match self {
            Self::Api { error, .. } => Some(error.code),
            _ => None,
        }
    }

    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self.api_code(),
            Some(ErrorCode::Unauthorized | ErrorCode::Forbidden)
        )
    }
}
