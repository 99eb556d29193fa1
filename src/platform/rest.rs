//! REST session against the platform's HTTP API
//!
//! Implements the session traits with `reqwest`.
//!
//! # Session lifecycle
//!
//! [`RestSessionFactory::open`] builds a fresh `reqwest::Client` for every
//! credential and exchanges login and password for an access token with the
//! OAuth2 password grant. The resulting [`RestSession`] carries that token
//! as a bearer header on every call and is simply dropped when the check is
//! over; no logout call is made.
//!
//! Every request is bounded by the configured timeout and retried with
//! backoff on transient failures only. Rejected credentials are never
//! retried.

use crate::constants::{
    BULK_META_PATH, CONNECT_TIMEOUT_SECS, SEARCH_USERS_PATH, TOKEN_PATH, TOKEN_SCOPE,
};
use crate::core::session::{ApiSession, ResourceNode, SessionFactory, UserDirectory};
use crate::models::{ConnectionParams, Credentials};
use crate::utils::{retry_with_backoff, RetryConfig, SessionError};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

/// Longest slice of an error body kept in an error message
const MAX_ERROR_BODY: usize = 200;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct BulkMetaResponse {
    #[serde(rename = "Nodes", default)]
    nodes: Vec<ResourceNode>,
}

fn build_client(params: &ConnectionParams) -> Result<Client, SessionError> {
    Client::builder()
        .user_agent(params.user_agent.as_str())
        .timeout(params.timeout)
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .danger_accept_invalid_certs(params.skip_verify)
        .build()
        .map_err(|e| SessionError::Connection {
            message: format!("Failed to create HTTP client: {}", e),
            transient: false,
        })
}

/// Turn a non-success response into an error, keeping a short body excerpt
async fn api_error(response: Response) -> SessionError {
    let status = response.status();
    if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
        return SessionError::Authentication;
    }
    let body = response.text().await.unwrap_or_default();
    let message: String = body.trim().chars().take(MAX_ERROR_BODY).collect();
    SessionError::Api {
        status: status.as_u16(),
        message,
    }
}

/// Opens [`RestSession`]s
#[derive(Debug, Clone, Default)]
pub struct RestSessionFactory {
    retry: RetryConfig,
}

impl RestSessionFactory {
    pub fn new(retry: RetryConfig) -> Self {
        Self { retry }
    }

    async fn request_token(
        &self,
        client: &Client,
        params: &ConnectionParams,
        credentials: &Credentials,
    ) -> Result<String, SessionError> {
        let url = params.endpoint(TOKEN_PATH);
        let url = url.as_str();

        retry_with_backoff(
            &self.retry,
            move || async move {
                let form = [
                    ("grant_type", "password"),
                    ("username", credentials.username().as_str()),
                    ("password", credentials.password().as_str()),
                    ("client_id", params.client_id.as_str()),
                    ("client_secret", params.client_secret.as_str()),
                    ("scope", TOKEN_SCOPE),
                ];
                let response = client.post(url).form(&form).send().await?;

                let status = response.status();
                // The token endpoint answers 400 invalid_grant for bad passwords.
                if status == StatusCode::BAD_REQUEST {
                    return Err(SessionError::Authentication);
                }
                if !status.is_success() {
                    return Err(api_error(response).await);
                }

                let token: TokenResponse = response.json().await?;
                if token.access_token.is_empty() {
                    return Err(SessionError::Decode(
                        "token response without access_token".to_string(),
                    ));
                }
                Ok(token.access_token)
            },
            SessionError::is_transient,
        )
        .await
    }
}

#[async_trait::async_trait]
impl SessionFactory for RestSessionFactory {
    async fn open(
        &self,
        params: &ConnectionParams,
        credentials: &Credentials,
    ) -> Result<Box<dyn ApiSession>, SessionError> {
        let login = credentials.username().as_str();
        tracing::debug!(login, server = %params.base_url(), "opening session");

        let client = build_client(params)?;
        let access_token = self.request_token(&client, params, credentials).await?;

        Ok(Box::new(RestSession {
            login: login.to_string(),
            base_url: params.base_url(),
            client,
            access_token,
            retry: self.retry.clone(),
        }))
    }
}

/// Authenticated session for one account
pub struct RestSession {
    login: String,
    base_url: String,
    client: Client,
    /// SECURITY: never logged
    access_token: String,
    retry: RetryConfig,
}

impl RestSession {
    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &Value,
    ) -> Result<T, SessionError> {
        let url = format!("{}{}", self.base_url, path);
        let url = url.as_str();
        let client = &self.client;
        let token = self.access_token.as_str();

        retry_with_backoff(
            &self.retry,
            move || async move {
                let response = client
                    .post(url)
                    .bearer_auth(token)
                    .json(body)
                    .send()
                    .await?;

                if !response.status().is_success() {
                    return Err(api_error(response).await);
                }
                response.json::<T>().await.map_err(SessionError::from)
            },
            SessionError::is_transient,
        )
        .await
    }
}

#[async_trait::async_trait]
impl ApiSession for RestSession {
    fn login(&self) -> &str {
        &self.login
    }

    async fn search_users(&self) -> Result<UserDirectory, SessionError> {
        self.post_json(SEARCH_USERS_PATH, &json!({})).await
    }

    async fn bulk_meta(&self, patterns: &[&str]) -> Result<Vec<ResourceNode>, SessionError> {
        let response: BulkMetaResponse = self
            .post_json(BULK_META_PATH, &json!({ "NodePaths": patterns }))
            .await?;
        Ok(response.nodes)
    }
}
