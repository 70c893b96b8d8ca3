//! Line-oriented form input for each screen.

use std::io::{self, BufRead, Write};

use shared::{
    domain::{Credentials, LogDrainType},
    protocol::DrainParams,
};

use crate::controller::{events::UiAction, reducer::ViewState};

const SETUP_CODE_PREFIX: &str = ":code";
const TOKEN_PROMPT: &str = "Access token: ";
const CLEAR_FIELD: &str = "-";

/// Where the access token is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenInput {
    /// From the regular input, echoed.
    #[default]
    Echoed,
    /// From the controlling terminal with echo turned off.
    Hidden,
}

/// Reads the user's next action for `state`. Returns `None` when the user
/// quits or input ends.
pub fn next_action<R: BufRead, W: Write>(
    state: &ViewState,
    token_input: TokenInput,
    input: &mut R,
    output: &mut W,
) -> io::Result<Option<UiAction>> {
    if state.is_submitting() {
        return Err(io::Error::new(
            io::ErrorKind::Other,
            "a request is already in flight",
        ));
    }
    match state {
        ViewState::Login { .. } => login_action(token_input, input, output),
        ViewState::LoggedIn { .. } => overview_action(input, output),
        ViewState::CreateNewDrain { form, .. } => new_drain_action(form, input, output),
    }
}

fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn ask<R: BufRead, W: Write>(
    prompt: &str,
    input: &mut R,
    output: &mut W,
) -> io::Result<Option<String>> {
    write!(output, "{prompt}")?;
    output.flush()?;
    read_line(input)
}

/// Blank keeps `current`, `-` clears the field.
fn ask_field<R: BufRead, W: Write>(
    label: &str,
    current: &str,
    input: &mut R,
    output: &mut W,
) -> io::Result<Option<String>> {
    let Some(answer) = ask(&format!("{label} [{current}]: "), input, output)? else {
        return Ok(None);
    };
    let answer = answer.trim();
    Ok(Some(match answer {
        "" => current.to_string(),
        CLEAR_FIELD => String::new(),
        other => other.to_string(),
    }))
}

fn login_action<R: BufRead, W: Write>(
    token_input: TokenInput,
    input: &mut R,
    output: &mut W,
) -> io::Result<Option<UiAction>> {
    loop {
        let Some(team_id) = ask(
            "Team ID (blank for personal account, `:code <setup code>` to use a setup code, q to quit): ",
            input,
            output,
        )?
        else {
            return Ok(None);
        };
        let team_id = team_id.trim();
        if team_id == "q" {
            return Ok(None);
        }
        if let Some(code) = team_id.strip_prefix(SETUP_CODE_PREFIX) {
            let code = code.trim();
            if code.is_empty() {
                writeln!(output, "a setup code is required")?;
                continue;
            }
            return Ok(Some(UiAction::SubmitSetupCode(code.to_string())));
        }

        let token = match token_input {
            TokenInput::Echoed => ask(TOKEN_PROMPT, input, output)?,
            TokenInput::Hidden => {
                output.flush()?;
                Some(rpassword::prompt_password(TOKEN_PROMPT)?)
            }
        };
        let Some(token) = token else {
            return Ok(None);
        };
        if token.trim().is_empty() {
            writeln!(output, "an access token is required")?;
            continue;
        }
        return Ok(Some(UiAction::SubmitLogin(Credentials::from_form(
            team_id, &token,
        ))));
    }
}

fn overview_action<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> io::Result<Option<UiAction>> {
    loop {
        let Some(choice) = ask("[c] create new drain  [l] log out  [q] quit: ", input, output)?
        else {
            return Ok(None);
        };
        match choice.trim().to_ascii_lowercase().as_str() {
            "c" => return Ok(Some(UiAction::CreateClicked)),
            "l" => return Ok(Some(UiAction::Logout)),
            "q" => return Ok(None),
            other => writeln!(output, "unknown choice `{other}`")?,
        }
    }
}

fn new_drain_action<R: BufRead, W: Write>(
    form: &DrainParams,
    input: &mut R,
    output: &mut W,
) -> io::Result<Option<UiAction>> {
    let mut params = form.clone();

    let Some(name) = ask_field("Name", &params.name, input, output)? else {
        return Ok(None);
    };
    params.name = name;
    let Some(url) = ask_field("URL", &params.url, input, output)? else {
        return Ok(None);
    };
    params.url = url;
    params.drain_type = loop {
        let Some(raw) = ask_field(
            "Type (json, ndjson, syslog)",
            params.drain_type.as_str(),
            input,
            output,
        )?
        else {
            return Ok(None);
        };
        match raw.parse::<LogDrainType>() {
            Ok(kind) => break kind,
            Err(err) => writeln!(output, "{err}")?,
        }
    };
    let Some(project_id) = ask_field("Project ID", &params.project_id, input, output)? else {
        return Ok(None);
    };
    params.project_id = project_id;
    let Some(secret) = ask_field("Secret", &params.secret, input, output)? else {
        return Ok(None);
    };
    params.secret = secret;

    loop {
        let Some(choice) = ask("[s] submit  [x] cancel  [q] quit: ", input, output)? else {
            return Ok(None);
        };
        match choice.trim().to_ascii_lowercase().as_str() {
            "s" => return Ok(Some(UiAction::SubmitDrain(params))),
            "x" => return Ok(Some(UiAction::Cancel)),
            "q" => return Ok(None),
            other => writeln!(output, "unknown choice `{other}`")?,
        }
    }
}

#[cfg(test)]
#[path = "../tests/prompt_tests.rs"]
mod tests;
