//! Command orchestration from UI actions to the backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorCategory, UiEvent};

/// Queues `cmd` for the backend worker. When it cannot be queued, returns the
/// failure event the UI should apply instead, so a submitting screen is never
/// left waiting on a command that will not run.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
) -> Result<(), UiEvent> {
    let cmd_name = cmd.name();

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            Ok(())
        }
        Err(TrySendError::Full(cmd)) => {
            tracing::warn!(command = cmd_name, "backend command queue is full");
            Err(cmd.failure_event(UiError::new(
                UiErrorCategory::Transport,
                cmd.context(),
                "command queue is full; please retry",
            )))
        }
        Err(TrySendError::Disconnected(cmd)) => {
            tracing::error!(command = cmd_name, "backend worker disconnected");
            Err(cmd.failure_event(UiError::new(
                UiErrorCategory::Transport,
                cmd.context(),
                "backend worker is not running; restart the console",
            )))
        }
    }
}

#[cfg(test)]
#[path = "../tests/orchestration_tests.rs"]
mod tests;
