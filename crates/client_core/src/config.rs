use std::{fs, path::Path, time::Duration};

use serde::Deserialize;
use shared::domain::Credentials;

pub const DEFAULT_API_URL: &str = "https://api.vercel.com";
pub const DEFAULT_SETTINGS_FILE: &str = "drains.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub redirect_uri: Option<String>,
    pub team_id: Option<String>,
    pub access_token: Option<String>,
    pub request_timeout_seconds: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            client_id: None,
            client_secret: None,
            redirect_uri: None,
            team_id: None,
            access_token: None,
            request_timeout_seconds: 30,
        }
    }
}

/// Credentials of the integration itself, used only for the code exchange.
#[derive(Clone, PartialEq, Eq)]
pub struct OAuthApp {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

impl std::fmt::Debug for OAuthApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthApp")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("redirect_uri", &self.redirect_uri)
            .finish()
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    pub fn oauth_app(&self) -> Option<OAuthApp> {
        Some(OAuthApp {
            client_id: self.client_id.clone()?,
            client_secret: self.client_secret.clone()?,
            redirect_uri: self.redirect_uri.clone()?,
        })
    }

    /// Credentials supplied out of band, if an access token was configured.
    pub fn credentials(&self) -> Option<Credentials> {
        let token = self.access_token.as_deref()?;
        Some(Credentials::from_form(
            self.team_id.as_deref().unwrap_or_default(),
            token,
        ))
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_url: Option<String>,
    client_id: Option<String>,
    client_secret: Option<String>,
    redirect_uri: Option<String>,
    team_id: Option<String>,
    request_timeout_seconds: Option<u64>,
}

pub fn load_settings(path: Option<&Path>) -> Settings {
    let path = path.unwrap_or_else(|| Path::new(DEFAULT_SETTINGS_FILE));
    let raw = fs::read_to_string(path).ok();
    load_settings_from(raw.as_deref(), |key| std::env::var(key).ok())
}

/// Layers defaults, then the settings file, then environment variables.
pub fn load_settings_from(
    file_contents: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = file_contents {
        match toml::from_str::<FileSettings>(raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.api_url {
                    settings.api_url = v;
                }
                settings.client_id = file_cfg.client_id.or(settings.client_id);
                settings.client_secret = file_cfg.client_secret.or(settings.client_secret);
                settings.redirect_uri = file_cfg.redirect_uri.or(settings.redirect_uri);
                settings.team_id = file_cfg.team_id.or(settings.team_id);
                match file_cfg.request_timeout_seconds {
                    Some(0) => tracing::warn!("ignoring zero request timeout in settings file"),
                    Some(v) => settings.request_timeout_seconds = v,
                    None => {}
                }
            }
            Err(err) => tracing::warn!(error = %err, "ignoring malformed settings file"),
        }
    }

    let lookup = |names: &[&str]| names.iter().rev().find_map(|name| env(name));

    if let Some(v) = lookup(&["VERCEL_API_URL", "APP__API_URL"]) {
        settings.api_url = v;
    }
    if let Some(v) = lookup(&["VERCEL_CLIENT_ID", "APP__CLIENT_ID"]) {
        settings.client_id = Some(v);
    }
    if let Some(v) = lookup(&["VERCEL_CLIENT_SECRET", "APP__CLIENT_SECRET"]) {
        settings.client_secret = Some(v);
    }
    if let Some(v) = lookup(&["VERCEL_REDIRECT_URI", "APP__REDIRECT_URI"]) {
        settings.redirect_uri = Some(v);
    }
    if let Some(v) = lookup(&["VERCEL_TEAM_ID", "APP__TEAM_ID"]) {
        settings.team_id = Some(v);
    }
    if let Some(v) = lookup(&["VERCEL_ACCESS_TOKEN", "APP__ACCESS_TOKEN"]) {
        settings.access_token = Some(v);
    }
    if let Some(v) = lookup(&["VERCEL_TIMEOUT_SECONDS", "APP__TIMEOUT_SECONDS"]) {
        match v.parse::<u64>() {
            Ok(parsed) if parsed > 0 => settings.request_timeout_seconds = parsed,
            _ => tracing::warn!(value = %v, "ignoring invalid request timeout"),
        }
    }

    settings
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
