//! View state machine: pure transitions on user actions and backend completions.
//!
//! At most one backend command is in flight. While a screen is submitting,
//! user actions are ignored, and completions that arrive for a screen that is
//! not waiting on one are dropped as stale.

use shared::{
    domain::{Credentials, LogDrain},
    protocol::DrainParams,
};
use tracing::{debug, warn};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiAction, UiError, UiEvent};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Login {
        submitting: bool,
        error: Option<String>,
    },
    LoggedIn {
        credentials: Credentials,
        drains: Vec<LogDrain>,
    },
    CreateNewDrain {
        credentials: Credentials,
        drains: Vec<LogDrain>,
        form: DrainParams,
        submitting: bool,
        error: Option<String>,
    },
}

impl ViewState {
    pub fn initial() -> Self {
        Self::Login {
            submitting: false,
            error: None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        match self {
            Self::Login { submitting, .. } | Self::CreateNewDrain { submitting, .. } => {
                *submitting
            }
            Self::LoggedIn { .. } => false,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Login { submitting: true, .. } => "logging_in",
            Self::Login { .. } => "login",
            Self::LoggedIn { .. } => "logged_in",
            Self::CreateNewDrain { submitting: true, .. } => "submitting_drain",
            Self::CreateNewDrain { .. } => "create_new_drain",
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Login { error, .. } | Self::CreateNewDrain { error, .. } => error.as_deref(),
            Self::LoggedIn { .. } => None,
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::initial()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: ViewState,
    pub command: Option<BackendCommand>,
}

impl Transition {
    fn stay(state: ViewState) -> Self {
        Self {
            state,
            command: None,
        }
    }

    fn run(state: ViewState, command: BackendCommand) -> Self {
        Self {
            state,
            command: Some(command),
        }
    }
}

pub fn apply_action(state: ViewState, action: UiAction) -> Transition {
    if state.is_submitting() {
        debug!(state = state.name(), "ignoring input while a request is in flight");
        return Transition::stay(state);
    }

    match (state, action) {
        (ViewState::Login { .. }, UiAction::SubmitLogin(credentials)) => Transition::run(
            ViewState::Login {
                submitting: true,
                error: None,
            },
            BackendCommand::Login { credentials },
        ),
        (ViewState::Login { .. }, UiAction::SubmitSetupCode(code)) => Transition::run(
            ViewState::Login {
                submitting: true,
                error: None,
            },
            BackendCommand::ExchangeCode { code },
        ),
        (
            ViewState::LoggedIn {
                credentials,
                drains,
            },
            UiAction::CreateClicked,
        ) => Transition::stay(ViewState::CreateNewDrain {
            credentials,
            drains,
            form: DrainParams::new(),
            submitting: false,
            error: None,
        }),
        (ViewState::LoggedIn { .. }, UiAction::Logout) => Transition::stay(ViewState::initial()),
        (
            ViewState::CreateNewDrain {
                credentials,
                drains,
                ..
            },
            UiAction::Cancel,
        ) => Transition::stay(ViewState::LoggedIn {
            credentials,
            drains,
        }),
        (
            ViewState::CreateNewDrain {
                credentials,
                drains,
                ..
            },
            UiAction::SubmitDrain(form),
        ) => match form.validate() {
            Ok(request) => Transition::run(
                ViewState::CreateNewDrain {
                    credentials: credentials.clone(),
                    drains,
                    form,
                    submitting: true,
                    error: None,
                },
                BackendCommand::CreateDrain {
                    credentials,
                    request,
                },
            ),
            Err(err) => Transition::stay(ViewState::CreateNewDrain {
                credentials,
                drains,
                form,
                submitting: false,
                error: Some(UiError::from_form_error(&err).user_message()),
            }),
        },
        (state, action) => {
            warn!(state = state.name(), action = action_name(&action), "action not valid here");
            Transition::stay(state)
        }
    }
}

pub fn apply_event(state: ViewState, event: UiEvent) -> ViewState {
    match (state, event) {
        (
            ViewState::Login {
                submitting: true, ..
            },
            UiEvent::LoggedIn {
                credentials,
                drains,
            },
        ) => ViewState::LoggedIn {
            credentials,
            drains,
        },
        (
            ViewState::Login {
                submitting: true, ..
            },
            UiEvent::LoginFailed(err),
        ) => {
            log_failure(&err);
            ViewState::Login {
                submitting: false,
                error: Some(err.user_message()),
            }
        }
        (
            ViewState::CreateNewDrain {
                credentials,
                mut drains,
                submitting: true,
                ..
            },
            UiEvent::DrainCreated(drain),
        ) => {
            drains.push(drain);
            ViewState::LoggedIn {
                credentials,
                drains,
            }
        }
        (
            ViewState::CreateNewDrain {
                credentials,
                drains,
                form,
                submitting: true,
                ..
            },
            UiEvent::DrainCreationFailed(err),
        ) => {
            log_failure(&err);
            ViewState::CreateNewDrain {
                credentials,
                drains,
                form,
                submitting: false,
                error: Some(err.user_message()),
            }
        }
        (state, event) => {
            warn!(state = state.name(), event = event_name(&event), "dropping stale backend event");
            state
        }
    }
}

fn log_failure(err: &UiError) {
    debug!(
        category = ?err.category(),
        context = ?err.context(),
        detail = err.message(),
        "showing backend failure"
    );
}

fn action_name(action: &UiAction) -> &'static str {
    match action {
        UiAction::SubmitLogin(_) => "submit_login",
        UiAction::SubmitSetupCode(_) => "submit_setup_code",
        UiAction::CreateClicked => "create_clicked",
        UiAction::SubmitDrain(_) => "submit_drain",
        UiAction::Cancel => "cancel",
        UiAction::Logout => "logout",
    }
}

fn event_name(event: &UiEvent) -> &'static str {
    match event {
        UiEvent::LoggedIn { .. } => "logged_in",
        UiEvent::LoginFailed(_) => "login_failed",
        UiEvent::DrainCreated(_) => "drain_created",
        UiEvent::DrainCreationFailed(_) => "drain_creation_failed",
    }
}

#[cfg(test)]
#[path = "../tests/reducer_tests.rs"]
mod tests;
