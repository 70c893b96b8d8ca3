//! Fakes shared by the console tests.

use std::sync::Mutex;

use async_trait::async_trait;
use client_core::{ClientError, ClientResult, PlatformApi};
use reqwest::StatusCode;
use shared::{
    domain::{
        AccessToken, Credentials, DrainId, InstallationId, LogDrain, LogDrainType, Project,
        TeamId, TokenGrant, UserId,
    },
    error::{ApiError, ErrorCode},
    protocol::CreateLogDrainRequest,
};

pub fn drain(id: &str, name: &str) -> LogDrain {
    LogDrain {
        id: DrainId::from(id),
        name: name.to_string(),
        drain_type: LogDrainType::Ndjson,
        url: format!("https://{name}.example.com/logs"),
        project_id: None,
        created_at: None,
    }
}

pub fn credentials() -> Credentials {
    Credentials::new(Some(TeamId::from("team_1")), AccessToken::new("tok_abc"))
}

pub fn unauthorized(endpoint: &'static str) -> ClientError {
    ClientError::Api {
        endpoint,
        status: StatusCode::UNAUTHORIZED,
        error: ApiError::new(ErrorCode::Unauthorized, "invalid token"),
    }
}

#[derive(Default)]
pub struct FakeApi {
    pub drains: Vec<LogDrain>,
    pub reject_token: bool,
    pub reject_create: bool,
    pub calls: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn with_drains(drains: Vec<LogDrain>) -> Self {
        Self {
            drains,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls").clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().expect("calls").push(call);
    }
}

#[async_trait]
impl PlatformApi for FakeApi {
    async fn exchange_code(&self, code: &str) -> ClientResult<TokenGrant> {
        self.record(format!("exchange_code:{code}"));
        if code == "expired" {
            return Err(ClientError::Api {
                endpoint: "access_token",
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new(ErrorCode::Validation, "code expired")
                    .with_remote_code("bad_request"),
            });
        }
        Ok(TokenGrant {
            token_type: "Bearer".into(),
            access_token: AccessToken::new("tok_from_code"),
            installation_id: InstallationId::from("icfg_1"),
            user_id: UserId::from("user_1"),
            team_id: Some(TeamId::from("team_code")),
        })
    }

    async fn list_projects(&self, _credentials: &Credentials) -> ClientResult<Vec<Project>> {
        self.record("list_projects".into());
        Ok(Vec::new())
    }

    async fn list_log_drains(&self, credentials: &Credentials) -> ClientResult<Vec<LogDrain>> {
        self.record(format!(
            "list_log_drains:{}",
            credentials
                .team_id
                .as_ref()
                .map(TeamId::as_str)
                .unwrap_or("-")
        ));
        if self.reject_token {
            return Err(unauthorized("list_log_drains"));
        }
        Ok(self.drains.clone())
    }

    async fn create_log_drain(
        &self,
        _credentials: &Credentials,
        request: &CreateLogDrainRequest,
    ) -> ClientResult<LogDrain> {
        self.record(format!("create_log_drain:{}", request.name));
        if self.reject_create {
            return Err(ClientError::Api {
                endpoint: "create_log_drain",
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new(ErrorCode::Validation, "url is not reachable"),
            });
        }
        Ok(LogDrain {
            id: DrainId::from("ld_new"),
            name: request.name.clone(),
            drain_type: request.drain_type,
            url: request.url.clone(),
            project_id: request.project_id.clone(),
            created_at: None,
        })
    }
}
