//! User actions, backend completions and error modeling for the console controller.

use client_core::ClientError;
use shared::{
    domain::{Credentials, LogDrain},
    error::{ErrorCode, FormError},
    protocol::DrainParams,
};

/// Something the user did on the current screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    SubmitLogin(Credentials),
    SubmitSetupCode(String),
    CreateClicked,
    SubmitDrain(DrainParams),
    Cancel,
    Logout,
}

/// Completion of a backend command. Exactly one is produced per command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    LoggedIn {
        credentials: Credentials,
        drains: Vec<LogDrain>,
    },
    LoginFailed(UiError),
    DrainCreated(LogDrain),
    DrainCreationFailed(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Auth,
    Transport,
    Decode,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    Login,
    CreateDrain,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn new(
        category: UiErrorCategory,
        context: UiErrorContext,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            context,
            message: message.into(),
        }
    }

    pub fn from_client_error(context: UiErrorContext, err: &ClientError) -> Self {
        let category = match err {
            ClientError::Api { .. } if err.is_auth_failure() => UiErrorCategory::Auth,
            ClientError::Api { error, .. } if error.code == ErrorCode::Validation => {
                UiErrorCategory::Validation
            }
            ClientError::Api { .. } => UiErrorCategory::Unknown,
            ClientError::Transport { .. } => UiErrorCategory::Transport,
            ClientError::Decode { .. } => UiErrorCategory::Decode,
            ClientError::OAuthNotConfigured | ClientError::InvalidUrl(_) => {
                UiErrorCategory::Validation
            }
        };
        Self::new(category, context, err.to_string())
    }

    pub fn from_form_error(err: &FormError) -> Self {
        Self::new(
            UiErrorCategory::Validation,
            UiErrorContext::CreateDrain,
            err.to_string(),
        )
    }

    pub fn requires_reauth(&self) -> bool {
        self.category == UiErrorCategory::Auth
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Text shown on screen. Login failures stay deliberately vague; the
    /// detailed cause only goes to the log.
    pub fn user_message(&self) -> String {
        match (self.context, self.category) {
            (UiErrorContext::Login, UiErrorCategory::Auth) => {
                "Login failed. Check the team ID and access token.".to_string()
            }
            (UiErrorContext::Login, UiErrorCategory::Transport) => {
                "Login failed. The API could not be reached.".to_string()
            }
            (UiErrorContext::Login, UiErrorCategory::Validation) => {
                format!("Login failed. {}", self.message)
            }
            (UiErrorContext::Login, _) => "Login failed.".to_string(),
            _ if self.requires_reauth() => format!(
                "{} (the access token may have been revoked; log out and sign in again)",
                self.message
            ),
            _ => self.message.clone(),
        }
    }
}
