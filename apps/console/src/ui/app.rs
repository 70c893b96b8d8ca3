//! The wizard loop: render, read input or wait for the backend, transition.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use crossbeam_channel::{Receiver, Sender};
use tracing::debug;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::{UiAction, UiEvent},
    orchestration::dispatch_backend_command,
    reducer::{apply_action, apply_event, Transition, ViewState},
};
use crate::ui::{
    prompt::{next_action, TokenInput},
    view::render,
};

pub struct ConsoleApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    state: ViewState,
    token_input: TokenInput,
}

impl ConsoleApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            state: ViewState::initial(),
            token_input: TokenInput::default(),
        }
    }

    /// Reads the access token without echo, for interactive terminals.
    pub fn hide_token_input(mut self) -> Self {
        self.token_input = TokenInput::Hidden;
        self
    }

    #[cfg(test)]
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Runs until the user quits or input ends. `first_action` is applied
    /// before any input is read, e.g. a setup code passed on the command line.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        output: &mut W,
        mut first_action: Option<UiAction>,
    ) -> Result<()> {
        loop {
            writeln!(output)?;
            write!(output, "{}", render(&self.state))?;

            if self.state.is_submitting() {
                let event = self
                    .ui_rx
                    .recv()
                    .context("backend worker stopped while a request was in flight")?;
                self.handle_event(event);
                continue;
            }

            let action = match first_action.take() {
                Some(action) => action,
                None => match next_action(&self.state, self.token_input, input, output)? {
                    Some(action) => action,
                    None => return Ok(()),
                },
            };
            self.handle_action(action);
        }
    }

    pub fn handle_action(&mut self, action: UiAction) {
        let state = std::mem::take(&mut self.state);
        let Transition { state, command } = apply_action(state, action);
        debug!(state = state.name(), "view transition");
        self.state = state;

        if let Some(cmd) = command {
            if let Err(failure) = dispatch_backend_command(&self.cmd_tx, cmd) {
                self.handle_event(failure);
            }
        }
    }

    pub fn handle_event(&mut self, event: UiEvent) {
        let state = std::mem::take(&mut self.state);
        self.state = apply_event(state, event);
        debug!(state = self.state.name(), "view transition");
    }
}

#[cfg(test)]
#[path = "../tests/app_tests.rs"]
mod tests;
