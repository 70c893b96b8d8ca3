//! Backend commands queued from the UI to the backend worker.

use shared::{domain::Credentials, protocol::CreateLogDrainRequest};

use crate::controller::events::{UiError, UiErrorContext, UiEvent};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    Login {
        credentials: Credentials,
    },
    ExchangeCode {
        code: String,
    },
    CreateDrain {
        credentials: Credentials,
        request: CreateLogDrainRequest,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Login { .. } => "login",
            Self::ExchangeCode { .. } => "exchange_code",
            Self::CreateDrain { .. } => "create_drain",
        }
    }

    pub fn context(&self) -> UiErrorContext {
        match self {
            Self::Login { .. } | Self::ExchangeCode { .. } => UiErrorContext::Login,
            Self::CreateDrain { .. } => UiErrorContext::CreateDrain,
        }
    }

    /// The completion to report when this command cannot run at all.
    pub fn failure_event(&self, error: UiError) -> UiEvent {
        match self {
            Self::Login { .. } | Self::ExchangeCode { .. } => UiEvent::LoginFailed(error),
            Self::CreateDrain { .. } => UiEvent::DrainCreationFailed(error),
        }
    }
}
