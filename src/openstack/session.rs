//! reqwest backed control plane with Keystone v3 authentication

use std::time::{Duration, Instant};

use reqwest::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client as HttpClient, ClientBuilder, Method, StatusCode};
use serde_json::json;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::error::OstackError;
use crate::openstack::{ControlPlane, RawResponse};

const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";
const SUBJECT_TOKEN_HEADER: &str = "X-Subject-Token";
const CLIENT_NAME: &str = concat!("ostack-net/", env!("CARGO_PKG_VERSION"));

/// Keystone password credentials
#[derive(Debug, Clone)]
pub struct PasswordAuth {
    pub auth_url: String,
    pub username: String,
    pub password: String,
    pub user_domain: String,
    pub project_name: Option<String>,
    pub project_id: Option<String>,
    pub project_domain: String,
}

impl PasswordAuth {
    fn request_body(&self) -> serde_json::Value {
        let identity = json!({
            "methods": ["password"],
            "password": {
                "user": {
                    "name": self.username,
                    "domain": { "name": self.user_domain },
                    "password": self.password,
                }
            }
        });

        let scope = match (&self.project_id, &self.project_name) {
            (Some(id), _) => Some(json!({ "project": { "id": id } })),
            (None, Some(name)) => Some(json!({
                "project": { "name": name, "domain": { "name": self.project_domain } }
            })),
            (None, None) => None,
        };

        match scope {
            Some(scope) => json!({ "auth": { "identity": identity, "scope": scope } }),
            None => json!({ "auth": { "identity": identity } }),
        }
    }
}

#[derive(Debug, Clone)]
enum AuthMethod {
    Token(String),
    Password(PasswordAuth),
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    issued: Instant,
}

/// HTTP transport that keeps a Keystone token fresh
#[derive(Debug)]
pub struct HttpControlPlane {
    client: HttpClient,
    auth: AuthMethod,
    token: RwLock<Option<CachedToken>>,
    token_lifetime: Duration,
}

impl HttpControlPlane {
    /// Use a pre-issued token for every request
    pub fn with_token(client: HttpClient, token: impl Into<String>) -> Self {
        Self {
            client,
            auth: AuthMethod::Token(token.into()),
            token: RwLock::new(None),
            token_lifetime: Duration::MAX,
        }
    }

    /// Authenticate with a password, re-authenticating once the token ages out
    pub fn with_password(client: HttpClient, auth: PasswordAuth, token_lifetime: Duration) -> Self {
        Self {
            client,
            auth: AuthMethod::Password(auth),
            token: RwLock::new(None),
            token_lifetime,
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, OstackError> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(OstackError::Client)?;

        if let Some(token) = config.token.as_ref().filter(|t| !t.trim().is_empty()) {
            return Ok(Self::with_token(client, token.clone()));
        }

        let (Some(auth_url), Some(username), Some(password)) = (
            config.auth_url.clone(),
            config.username.clone(),
            config.password.clone(),
        ) else {
            return Err(OstackError::Auth(
                "no token and no complete password credentials configured".to_string(),
            ));
        };

        let auth = PasswordAuth {
            auth_url,
            username,
            password,
            user_domain: config.user_domain.clone(),
            project_name: config.project_name.clone(),
            project_id: config.project_id.clone(),
            project_domain: config.project_domain.clone(),
        };

        Ok(Self::with_password(
            client,
            auth,
            Duration::from_secs(config.token_lifetime_secs),
        ))
    }

    async fn authenticate(&self, auth: &PasswordAuth) -> Result<String, OstackError> {
        let url = format!("{}/auth/tokens", auth.auth_url.trim_end_matches('/'));
        debug!(url = %url, user = %auth.username, "requesting keystone token");

        let response = self
            .client
            .post(&url)
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, CLIENT_NAME)
            .json(&auth.request_body())
            .send()
            .await
            .map_err(|source| OstackError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if status != StatusCode::CREATED && status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(OstackError::Auth(format!(
                "keystone returned {} at {}: {}",
                status, url, body
            )));
        }

        response
            .headers()
            .get(SUBJECT_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| {
                OstackError::Auth(format!("no {} header in response", SUBJECT_TOKEN_HEADER))
            })
    }

    async fn current_token(&self) -> Result<String, OstackError> {
        match &self.auth {
            AuthMethod::Token(token) => Ok(token.clone()),
            AuthMethod::Password(_) => self
                .token
                .read()
                .await
                .as_ref()
                .map(|t| t.value.clone())
                .ok_or_else(|| OstackError::Auth("not authenticated".to_string())),
        }
    }
}

impl ControlPlane for HttpControlPlane {
    async fn validate_auth(&self) -> Result<(), OstackError> {
        let auth = match &self.auth {
            AuthMethod::Token(_) => return Ok(()),
            AuthMethod::Password(auth) => auth,
        };

        if let Some(cached) = self.token.read().await.as_ref() {
            if cached.issued.elapsed() < self.token_lifetime {
                return Ok(());
            }
        }

        let value = self.authenticate(auth).await?;
        *self.token.write().await = Some(CachedToken {
            value,
            issued: Instant::now(),
        });
        info!(user = %auth.username, "obtained keystone token");

        Ok(())
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<String>,
    ) -> Result<RawResponse, OstackError> {
        let token = self.current_token().await?;

        let mut request = self
            .client
            .request(method, url)
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, CLIENT_NAME)
            .header(AUTH_TOKEN_HEADER, token);
        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = request
            .send()
            .await
            .map_err(|source| OstackError::Transport {
                url: url.to_string(),
                source,
            })?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|source| OstackError::Transport {
                url: url.to_string(),
                source,
            })?;

        if !status.is_success() {
            return Err(OstackError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        Ok(RawResponse {
            body: bytes.to_vec(),
            status: status.as_u16(),
        })
    }
}
