use rand::Rng;
use serde::Serialize;
use url::Url;

use crate::{
    domain::{LogDrainType, ProjectId},
    error::FormError,
};

const SECRET_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
pub const DEFAULT_SECRET_LEN: usize = 8;

/// Form body for the OAuth code exchange.
#[derive(Debug, Clone, Serialize)]
pub struct AccessTokenRequest {
    pub client_id: String,
    pub client_secret: String,
    pub code: String,
    pub redirect_uri: String,
}

/// JSON body for creating a log drain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLogDrainRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub drain_type: LogDrainType,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ProjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
}

/// Raw contents of the create-drain form, exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrainParams {
    pub name: String,
    pub drain_type: LogDrainType,
    pub url: String,
    pub project_id: String,
    pub secret: String,
}

impl DrainParams {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            drain_type: LogDrainType::default(),
            url: String::new(),
            project_id: String::new(),
            secret: random_secret(DEFAULT_SECRET_LEN),
        }
    }

    pub fn validate(&self) -> Result<CreateLogDrainRequest, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::Required("name"));
        }

        let url = self.url.trim();
        if url.is_empty() {
            return Err(FormError::Required("url"));
        }
        match Url::parse(url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
            _ => return Err(FormError::InvalidUrl(url.to_string())),
        }

        Ok(CreateLogDrainRequest {
            name: name.to_string(),
            drain_type: self.drain_type,
            url: url.to_string(),
            project_id: non_empty(&self.project_id).map(ProjectId),
            secret: non_empty(&self.secret),
        })
    }
}

impl Default for DrainParams {
    fn default() -> Self {
        Self::new()
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Lowercase base-36 string suitable as a drain signing secret.
pub fn random_secret(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| SECRET_ALPHABET[rng.gen_range(0..SECRET_ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
