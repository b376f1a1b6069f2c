//! Shared HTTP client construction and response helpers.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};

use crate::auth::AccessToken;
use crate::error::{PurgeError, Result};

pub const GITHUB_JSON: &str = "application/vnd.github.v3+json";
pub const USER_AGENT: &str = concat!("gh-purge/", env!("CARGO_PKG_VERSION"));

/// Build the reqwest client used for every call in a run.
pub fn build_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(PurgeError::Network)
}

/// Headers for bearer-authenticated REST calls.
///
/// A token that cannot travel in a header is a configuration error rather
/// than a reason to send the request unauthenticated.
pub fn bearer_headers(token: &AccessToken) -> Result<HeaderMap> {
    let mut auth = HeaderValue::from_str(&format!("Bearer {}", token.secret())).map_err(|_| {
        PurgeError::Configuration("access token contains characters not allowed in a header".into())
    })?;
    auth.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_JSON));
    headers.insert(AUTHORIZATION, auth);
    Ok(headers)
}

/// Drain a response into its status code and body text.
pub async fn read_response(resp: reqwest::Response) -> Result<(u16, String)> {
    let status = resp.status().as_u16();
    let body = resp.text().await?;
    Ok((status, body))
}

/// Join a base URL and an absolute path without doubling slashes.
pub fn join(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
