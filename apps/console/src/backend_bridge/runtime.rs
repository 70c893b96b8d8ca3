//! Backend worker: runs queued commands against the platform API and reports
//! one completion event per command.

use std::{sync::Arc, thread};

use client_core::PlatformApi;
use crossbeam_channel::{Receiver, Sender};
use shared::domain::Credentials;
use tracing::{error, info, warn};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorCategory, UiErrorContext, UiEvent};

pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    api: Arc<dyn PlatformApi>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                error!("failed to build backend runtime: {err}");
                // Keep answering so the UI never waits forever on a command.
                for cmd in cmd_rx.iter() {
                    let failure = UiError::new(
                        UiErrorCategory::Unknown,
                        cmd.context(),
                        format!("backend worker startup failure: {err}"),
                    );
                    if ui_tx.send(cmd.failure_event(failure)).is_err() {
                        break;
                    }
                }
                return;
            }
        };

        for cmd in cmd_rx.iter() {
            let event = runtime.block_on(execute(api.as_ref(), cmd));
            if ui_tx.send(event).is_err() {
                warn!("ui event receiver dropped; stopping backend worker");
                break;
            }
        }
        info!("backend worker stopped");
    })
}

pub async fn execute(api: &dyn PlatformApi, cmd: BackendCommand) -> UiEvent {
    match cmd {
        BackendCommand::Login { credentials } => login(api, credentials).await,
        BackendCommand::ExchangeCode { code } => {
            let grant = match api.exchange_code(&code).await {
                Ok(grant) => grant,
                Err(err) => {
                    error!(error = %err, "setup code exchange failed");
                    return UiEvent::LoginFailed(UiError::from_client_error(
                        UiErrorContext::Login,
                        &err,
                    ));
                }
            };
            login(api, grant.credentials()).await
        }
        BackendCommand::CreateDrain {
            credentials,
            request,
        } => match api.create_log_drain(&credentials, &request).await {
            Ok(drain) => UiEvent::DrainCreated(drain),
            Err(err) => {
                warn!(error = %err, drain_name = %request.name, "drain creation failed");
                UiEvent::DrainCreationFailed(UiError::from_client_error(
                    UiErrorContext::CreateDrain,
                    &err,
                ))
            }
        },
    }
}

async fn login(api: &dyn PlatformApi, credentials: Credentials) -> UiEvent {
    match api.list_log_drains(&credentials).await {
        Ok(drains) => {
            info!(drains = drains.len(), "login succeeded");
            UiEvent::LoggedIn {
                credentials,
                drains,
            }
        }
        Err(err) => {
            error!(error = %err, "login failed");
            UiEvent::LoginFailed(UiError::from_client_error(UiErrorContext::Login, &err))
        }
    }
}

#[cfg(test)]
#[path = "../tests/runtime_tests.rs"]
mod tests;
