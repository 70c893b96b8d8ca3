use std::{
    io::{self, IsTerminal},
    path::PathBuf,
    sync::Arc,
};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use client_core::{load_settings, VercelClient};
use crossbeam_channel::bounded;
use tracing_subscriber::EnvFilter;

mod backend_bridge;
mod controller;
mod ui;

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;

use backend_bridge::runtime;
use controller::events::UiAction;
use ui::ConsoleApp;

const COMMAND_QUEUE_DEPTH: usize = 4;
const EVENT_QUEUE_DEPTH: usize = 4;

/// Log in to Vercel and manage log drains from the terminal.
#[derive(Parser, Debug)]
struct Args {
    /// Settings file (defaults to ./drains.toml).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Overrides the API base URL from settings.
    #[arg(long)]
    api_url: Option<String>,
    /// Integration setup code to exchange for an access token on startup.
    #[arg(long)]
    code: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref());
    if let Some(api_url) = args.api_url {
        settings.api_url = api_url;
    }
    let client = VercelClient::from_settings(&settings).context("failed to build API client")?;
    tracing::info!(api_url = %client.base_url(), "starting drain console");

    let (cmd_tx, cmd_rx) = bounded(COMMAND_QUEUE_DEPTH);
    let (ui_tx, ui_rx) = bounded(EVENT_QUEUE_DEPTH);
    let worker = runtime::launch(cmd_rx, ui_tx, Arc::new(client));

    let first_action = args
        .code
        .map(UiAction::SubmitSetupCode)
        .or_else(|| settings.credentials().map(UiAction::SubmitLogin));

    let stdin = io::stdin();
    let mut app = ConsoleApp::new(cmd_tx, ui_rx);
    if stdin.is_terminal() {
        app = app.hide_token_input();
    }
    let result = app.run(&mut stdin.lock(), &mut io::stdout(), first_action);

    // Closing the command queue lets the worker finish.
    drop(app);
    worker
        .join()
        .map_err(|_| anyhow!("backend worker panicked"))?;
    result
}
