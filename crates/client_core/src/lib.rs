use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Credentials, LogDrain, Project, TeamId, TokenGrant},
    error::{ApiError, ErrorCode},
    protocol::{AccessTokenRequest, CreateLogDrainRequest},
};
use tracing::{debug, info, warn};
use url::Url;

pub mod config;
pub mod decode;
pub mod error;

pub use config::{load_settings, OAuthApp, Settings};
pub use error::ClientError;

use decode::{decode_json, ErrorEnvelope, ProjectList};

pub type ClientResult<T> = std::result::Result<T, ClientError>;

const USER_AGENT: &str = concat!("drain-console/", env!("CARGO_PKG_VERSION"));

const ACCESS_TOKEN_PATH: &str = "v2/oauth/access_token";
const PROJECTS_PATH: &str = "v4/projects";
const LOG_DRAINS_PATH: &str = "v1/integrations/log-drains";

const ACCESS_TOKEN_ENDPOINT: &str = "access_token";
const PROJECTS_ENDPOINT: &str = "projects";
const LIST_DRAINS_ENDPOINT: &str = "list_log_drains";
const CREATE_DRAIN_ENDPOINT: &str = "create_log_drain";

/// Operations the wizard and the tools need from the platform.
#[async_trait]
pub trait PlatformApi: Send + Sync {
    /// Trades a temporary integration setup code for an access token.
    async fn exchange_code(&self, code: &str) -> ClientResult<TokenGrant>;
    async fn list_projects(&self, credentials: &Credentials) -> ClientResult<Vec<Project>>;
    async fn list_log_drains(&self, credentials: &Credentials) -> ClientResult<Vec<LogDrain>>;
    async fn create_log_drain(
        &self,
        credentials: &Credentials,
        request: &CreateLogDrainRequest,
    ) -> ClientResult<LogDrain>;
}

pub struct VercelClient {
    http: Client,
    base_url: Url,
    oauth: Option<OAuthApp>,
}

impl VercelClient {
    pub fn new(base_url: &str) -> ClientResult<Self> {
        Ok(Self {
            http: Client::new(),
            base_url: normalize_base_url(base_url)?,
            oauth: None,
        })
    }

    pub fn from_settings(settings: &Settings) -> ClientResult<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(settings.request_timeout())
            .build()
            .map_err(|source| ClientError::Transport {
                endpoint: "client_builder",
                source,
            })?;
        Ok(Self {
            http,
            base_url: normalize_base_url(&settings.api_url)?,
            oauth: settings.oauth_app(),
        })
    }

    pub fn with_oauth_app(mut self, app: OAuthApp) -> Self {
        self.oauth = Some(app);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint_url(&self, path: &str, team_id: Option<&TeamId>) -> ClientResult<Url> {
        let mut url = self.base_url.join(path)?;
        if let Some(team_id) = team_id {
            url.query_pairs_mut().append_pair("teamId", team_id.as_str());
        }
        Ok(url)
    }
}

fn normalize_base_url(raw: &str) -> ClientResult<Url> {
    let raw = raw.trim();
    if raw.ends_with('/') {
        Ok(Url::parse(raw)?)
    } else {
        Ok(Url::parse(&format!("{raw}/"))?)
    }
}

async fn read_json<T: DeserializeOwned>(endpoint: &'static str, response: Response) -> ClientResult<T> {
    let status = response.status();
    let body = response
        .bytes()
        .await
        .map_err(|source| ClientError::Transport { endpoint, source })?;
    debug!(endpoint, status = %status, bytes = body.len(), "api response");

    if !status.is_success() {
        let err = api_error(endpoint, status, &body);
        warn!(endpoint, status = %status, error = %err, "api request rejected");
        return Err(err);
    }

    decode_json(&body).map_err(|source| {
        warn!(endpoint, path = source.path().unwrap_or("-"), "api response failed to decode");
        ClientError::Decode { endpoint, source }
    })
}

fn api_error(endpoint: &'static str, status: StatusCode, body: &[u8]) -> ClientError {
    let code = ErrorCode::from_status(status.as_u16());
    let error = match decode_json::<ErrorEnvelope>(body) {
        Ok(ErrorEnvelope { error: reply }) => {
            let error = ApiError::new(code, reply.message);
            match reply.code {
                Some(remote) => error.with_remote_code(remote),
                None => error,
            }
        }
        Err(_) => {
            let text = String::from_utf8_lossy(body).trim().to_string();
            let message = if text.is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            } else {
                text
            };
            ApiError::new(code, message)
        }
    };
    ClientError::Api {
        endpoint,
        status,
        error,
    }
}

#[async_trait]
impl PlatformApi for VercelClient {
    async fn exchange_code(&self, code: &str) -> ClientResult<TokenGrant> {
        let app = self.oauth.as_ref().ok_or(ClientError::OAuthNotConfigured)?;
        let url = self.endpoint_url(ACCESS_TOKEN_PATH, None)?;
        let form = AccessTokenRequest {
            client_id: app.client_id.clone(),
            client_secret: app.client_secret.clone(),
            code: code.to_string(),
            redirect_uri: app.redirect_uri.clone(),
        };
        let response = self
            .http
            .post(url)
            .form(&form)
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                endpoint: ACCESS_TOKEN_ENDPOINT,
                source,
            })?;
        let grant: TokenGrant = read_json(ACCESS_TOKEN_ENDPOINT, response).await?;
        info!(
            installation_id = %grant.installation_id,
            team_id = grant.team_id.as_ref().map(TeamId::as_str).unwrap_or("-"),
            "exchanged setup code for access token"
        );
        Ok(grant)
    }

    async fn list_projects(&self, credentials: &Credentials) -> ClientResult<Vec<Project>> {
        let url = self.endpoint_url(PROJECTS_PATH, credentials.team_id.as_ref())?;
        let response = self
            .http
            .get(url)
            .bearer_auth(credentials.access_token.expose())
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                endpoint: PROJECTS_ENDPOINT,
                source,
            })?;
        let ProjectList { projects } = read_json(PROJECTS_ENDPOINT, response).await?;
        Ok(projects)
    }

    async fn list_log_drains(&self, credentials: &Credentials) -> ClientResult<Vec<LogDrain>> {
        let url = self.endpoint_url(LOG_DRAINS_PATH, credentials.team_id.as_ref())?;
        let response = self
            .http
            .get(url)
            .bearer_auth(credentials.access_token.expose())
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                endpoint: LIST_DRAINS_ENDPOINT,
                source,
            })?;
        read_json(LIST_DRAINS_ENDPOINT, response).await
    }

    async fn create_log_drain(
        &self,
        credentials: &Credentials,
        request: &CreateLogDrainRequest,
    ) -> ClientResult<LogDrain> {
        let url = self.endpoint_url(LOG_DRAINS_PATH, credentials.team_id.as_ref())?;
        let response = self
            .http
            .post(url)
            .bearer_auth(credentials.access_token.expose())
            .json(request)
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                endpoint: CREATE_DRAIN_ENDPOINT,
                source,
            })?;
        let drain: LogDrain = read_json(CREATE_DRAIN_ENDPOINT, response).await?;
        info!(drain_id = %drain.id, drain_type = %drain.drain_type, "created log drain");
        Ok(drain)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
