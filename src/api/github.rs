use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use super::http::{bearer_headers, build_client, join, read_response};
use super::{Identity, Repository, RepositoryApi};
use crate::auth::{
    AccessToken, AccessTokenResponse, AuthError, DeviceAuthority, DeviceAuthorization,
    DeviceCodeResponse, TokenPoll,
};
use crate::config::PurgeConfig;
use crate::error::PurgeError;

const DEVICE_CODE_GRANT: &str = "urn:ietf:params:oauth:grant-type:device_code";

/// GitHub client covering the device-code endpoints and the repository API.
///
/// # Example
/// ```no_run
/// use gh_purge::api::GitHubClient;
/// use gh_purge::config::PurgeConfig;
///
/// let client = GitHubClient::new(&PurgeConfig::default())?
///     .with_api_url("http://127.0.0.1:8080");
/// # Ok::<(), gh_purge::error::PurgeError>(())
/// ```
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    client_id: String,
    scopes: String,
    oauth_url: String,
    api_url: String,
    page_size: usize,
    request_timeout: Duration,
    bulk_timeout: Duration,
}

impl GitHubClient {
    pub fn new(config: &PurgeConfig) -> Result<Self, PurgeError> {
        Ok(Self {
            http: build_client()?,
            client_id: config.client_id.clone(),
            scopes: config.scopes.clone(),
            oauth_url: config.oauth_url.clone(),
            api_url: config.api_url.clone(),
            page_size: config.page_size.max(1),
            request_timeout: config.request_timeout,
            bulk_timeout: config.bulk_timeout,
        })
    }

    pub fn with_oauth_url(mut self, url: impl Into<String>) -> Self {
        self.oauth_url = url.into();
        self
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    async fn fetch_page(
        &self,
        token: &AccessToken,
        page: usize,
    ) -> Result<Vec<Repository>, PurgeError> {
        let resp = self
            .http
            .get(join(&self.api_url, "/user/repos"))
            .headers(bearer_headers(token)?)
            .query(&[
                ("page", page.to_string()),
                ("per_page", self.page_size.to_string()),
                ("sort", "updated".to_string()),
            ])
            .timeout(self.bulk_timeout)
            .send()
            .await?;
        let (status, body) = read_response(resp).await?;
        if !(200..300).contains(&status) {
            tracing::warn!(page, status, "repository listing page failed");
            return Err(PurgeError::remote(status, body));
        }
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl DeviceAuthority for GitHubClient {
    async fn request_device_code(&self) -> Result<DeviceAuthorization, AuthError> {
        let resp = self
            .http
            .post(join(&self.oauth_url, "/login/device/code"))
            .header("Accept", "application/json")
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("scope", self.scopes.as_str()),
            ])
            .timeout(self.request_timeout)
            .send()
            .await?;
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(AuthError::RemoteUnavailable(format!(
                "device code request failed with status {}: {body}",
                status.as_u16()
            )));
        }
        let payload: DeviceCodeResponse = serde_json::from_str(&body)?;
        let authorization = DeviceAuthorization::from_response(payload)?;
        tracing::debug!(
            interval_secs = authorization.interval().as_secs(),
            expires_in_secs = authorization.expires_in().as_secs(),
            "device code issued"
        );
        Ok(authorization)
    }

    async fn poll_token(&self, device_code: &str) -> Result<TokenPoll, AuthError> {
        let resp = self
            .http
            .post(join(&self.oauth_url, "/login/oauth/access_token"))
            .header("Accept", "application/json")
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("device_code", device_code),
                ("grant_type", DEVICE_CODE_GRANT),
            ])
            .timeout(self.request_timeout)
            .send()
            .await?;
        let status = resp.status();
        let body = resp.text().await?;
        match serde_json::from_str::<AccessTokenResponse>(&body) {
            Ok(payload) => Ok(payload.classify()),
            Err(_) if !status.is_success() => Err(AuthError::RemoteUnavailable(format!(
                "token poll failed with status {}",
                status.as_u16()
            ))),
            Err(error) => Err(error.into()),
        }
    }
}

#[async_trait]
impl RepositoryApi for GitHubClient {
    async fn fetch_identity(&self, token: &AccessToken) -> Result<Identity, PurgeError> {
        let resp = self
            .http
            .get(join(&self.api_url, "/user"))
            .headers(bearer_headers(token)?)
            .timeout(self.request_timeout)
            .send()
            .await?;
        let (status, body) = read_response(resp).await?;
        if !(200..300).contains(&status) {
            return Err(PurgeError::remote(status, body));
        }
        Ok(serde_json::from_str(&body)?)
    }

    async fn list_repositories(&self, token: &AccessToken) -> Result<Vec<Repository>, PurgeError> {
        let mut repositories = Vec::new();
        let mut page = 1;
        loop {
            let batch = self.fetch_page(token, page).await?;
            let count = batch.len();
            tracing::debug!(page, count, "fetched repository page");
            repositories.extend(batch);
            if count < self.page_size {
                break;
            }
            page += 1;
        }
        Ok(repositories)
    }

    async fn delete_repository(&self, token: &AccessToken, full_name: &str) -> Result<(), PurgeError> {
        let resp = self
            .http
            .delete(join(&self.api_url, &format!("/repos/{full_name}")))
            .headers(bearer_headers(token)?)
            .timeout(self.bulk_timeout)
            .send()
            .await?;
        if resp.status() == StatusCode::NO_CONTENT {
            tracing::info!(repository = full_name, "repository deleted");
            return Ok(());
        }
        let (status, body) = read_response(resp).await?;
        tracing::warn!(repository = full_name, status, "repository deletion failed");
        Err(PurgeError::remote(status, body))
    }
}
