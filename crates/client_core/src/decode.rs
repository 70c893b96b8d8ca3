//! Typed decoding of untrusted API responses.
//!
//! Wire types derive `Deserialize`; bodies are decoded through
//! `serde_path_to_error` so a shape mismatch is reported with the JSON path of
//! the offending value (`$.projects[2].accountId`) instead of a byte offset.
//! Unknown fields are ignored.

use std::fmt::Write as _;

use serde::{de::DeserializeOwned, Deserialize};
use serde_json::error::Category;
use serde_path_to_error::{Path, Segment};
use shared::{domain::Project, error::DecodeError};

pub const ROOT: &str = "$";

pub fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, DecodeError> {
    let mut deserializer = serde_json::Deserializer::from_slice(body);
    let value = serde_path_to_error::deserialize(&mut deserializer).map_err(|err| {
        let path = json_path(err.path());
        classify(path, err.into_inner())
    })?;
    deserializer
        .end()
        .map_err(|err| DecodeError::Syntax(err.to_string()))?;
    Ok(value)
}

fn json_path(path: &Path) -> String {
    let mut out = String::from(ROOT);
    for segment in path.iter() {
        let _ = match segment {
            Segment::Seq { index } => write!(out, "[{index}]"),
            other => write!(out, ".{other}"),
        };
    }
    out
}

fn classify(path: String, err: serde_json::Error) -> DecodeError {
    if !matches!(err.classify(), Category::Data) {
        return DecodeError::Syntax(err.to_string());
    }
    let message = err.to_string();
    // serde_json appends the position; the path already locates the value.
    let message = match message.rsplit_once(" at line ") {
        Some((head, _)) => head.to_string(),
        None => message,
    };
    // A missing field is reported against its parent object.
    if let Some(field) = message
        .strip_prefix("missing field `")
        .and_then(|rest| rest.strip_suffix('`'))
    {
        return DecodeError::MissingField {
            path: format!("{path}.{field}"),
        };
    }
    DecodeError::Invalid { path, message }
}

/// `GET /v4/projects` wraps the list in an object.
#[derive(Debug, Deserialize)]
pub(crate) struct ProjectList {
    pub projects: Vec<Project>,
}

/// Body of a non-success reply: `{"error": {"code": "...", "message": "..."}}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    pub message: String,
}

#[cfg(test)]
#[path = "tests/decode_tests.rs"]
mod tests;
