use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

id_newtype!(TeamId);
id_newtype!(ProjectId);
id_newtype!(DrainId);
id_newtype!(InstallationId);
id_newtype!(UserId);

/// Bearer token for the platform API. Never printed in full.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

impl Serialize for AccessToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str("<redacted>")
    }
}

/// What every authenticated API call needs. `team_id` is absent for
/// personal accounts, in which case requests are not team-scoped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub team_id: Option<TeamId>,
    pub access_token: AccessToken,
}

impl Credentials {
    pub fn new(team_id: Option<TeamId>, access_token: AccessToken) -> Self {
        Self {
            team_id,
            access_token,
        }
    }

    /// Builds credentials from raw form input, treating a blank team ID as
    /// a personal account.
    pub fn from_form(team_id: &str, access_token: &str) -> Self {
        let team_id = team_id.trim();
        Self {
            team_id: (!team_id.is_empty()).then(|| TeamId(team_id.to_string())),
            access_token: AccessToken::new(access_token.trim()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogDrainType {
    Json,
    #[default]
    Ndjson,
    Syslog,
}

impl LogDrainType {
    pub const ALL: [LogDrainType; 3] = [Self::Json, Self::Ndjson, Self::Syslog];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Ndjson => "ndjson",
            Self::Syslog => "syslog",
        }
    }
}

impl fmt::Display for LogDrainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown log drain type `{0}` (expected json, ndjson or syslog)")]
pub struct UnknownDrainType(pub String);

impl FromStr for LogDrainType {
    type Err = UnknownDrainType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownDrainType(trimmed.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogDrain {
    pub id: DrainId,
    pub name: String,
    #[serde(rename = "type")]
    pub drain_type: LogDrainType,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ProjectId>,
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub account_id: String,
    pub id: ProjectId,
    pub name: String,
}

/// Result of trading an integration setup code for a long-lived token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenGrant {
    pub token_type: String,
    pub access_token: AccessToken,
    pub installation_id: InstallationId,
    pub user_id: UserId,
    /// Always sent, `null` when the integration is installed on a personal account.
    #[serde(deserialize_with = "present_or_null")]
    pub team_id: Option<TeamId>,
}

impl TokenGrant {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.team_id.clone(), self.access_token.clone())
    }
}

/// Like `Option::deserialize`, but the field itself must be present.
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::deserialize(deserializer)
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
