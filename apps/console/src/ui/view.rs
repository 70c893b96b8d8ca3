//! Pure text rendering of each view state.

use std::fmt::Write as _;

use shared::{domain::LogDrain, protocol::DrainParams};

use crate::controller::reducer::ViewState;

pub fn render(state: &ViewState) -> String {
    let mut out = String::new();
    match state {
        ViewState::Login { submitting, .. } => render_login(&mut out, *submitting),
        ViewState::LoggedIn { drains, .. } => render_drain_list(&mut out, drains),
        ViewState::CreateNewDrain {
            form, submitting, ..
        } => render_new_drain(&mut out, form, *submitting),
    }
    if let Some(error) = state.error() {
        let _ = writeln!(out, "! {error}");
    }
    out
}

fn render_login(out: &mut String, submitting: bool) {
    let _ = writeln!(out, "== Log in ==");
    let _ = writeln!(out, "Team ID:       (leave blank for a personal account)");
    let _ = writeln!(out, "Access token:  (input is not stored)");
    let label = if submitting { "Logging in…" } else { "Log in" };
    let _ = writeln!(out, "[{label}]");
}

fn render_drain_list(out: &mut String, drains: &[LogDrain]) {
    let plural = if drains.len() == 1 { "" } else { "s" };
    let _ = writeln!(out, "You have {} existing drain{plural}.", drains.len());
    for drain in drains {
        let _ = writeln!(out, "  - {}", drain_line(drain));
    }
    let _ = writeln!(out, "[Create new drain]");
}

pub fn drain_line(drain: &LogDrain) -> String {
    format!(
        "{} (#{}, type {}, logs to {})",
        drain.name, drain.id, drain.drain_type, drain.url
    )
}

fn render_new_drain(out: &mut String, form: &DrainParams, submitting: bool) {
    let _ = writeln!(out, "== New log drain ==");
    let _ = writeln!(out, "Name:        {}", form.name);
    let _ = writeln!(out, "URL:         {}", form.url);
    let _ = writeln!(out, "Type:        {}", form.drain_type);
    let _ = writeln!(out, "Project ID:  {}", form.project_id);
    let _ = writeln!(out, "Secret:      {}", form.secret);
    let label = if submitting {
        "Creating new drain…"
    } else {
        "Create new drain"
    };
    let _ = writeln!(out, "[{label}] [Cancel]");
}

#[cfg(test)]
#[path = "../tests/view_tests.rs"]
mod tests;
