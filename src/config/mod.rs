//! Configuration (layered: defaults < env < CLI flags).

use std::time::Duration;

use crate::error::{PurgeError, Result};

/// Public OAuth app registered for the device flow.
pub const DEFAULT_CLIENT_ID: &str = "Ov23liP6o0infpaUR8Eg";
pub const DEFAULT_OAUTH_URL: &str = "https://github.com";
pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_SCOPES: &str = "repo,delete_repo";

/// Settings for one purge run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurgeConfig {
    pub client_id: String,
    pub scopes: String,
    /// Base URL for `/login/device/code` and `/login/oauth/access_token`.
    pub oauth_url: String,
    /// Base URL for the REST API.
    pub api_url: String,
    /// Timeout for device-code, token-poll and identity requests.
    pub request_timeout: Duration,
    /// Timeout for listing pages and deletions.
    pub bulk_timeout: Duration,
    pub page_size: usize,
    pub slow_down_increment: Duration,
    /// Pause after each deletion attempt.
    pub delete_delay: Duration,
    pub accessible: bool,
    pub open_browser: bool,
    pub include_private: bool,
    /// Pre-supplied token for the token front-end.
    pub token: Option<String>,
}

impl Default for PurgeConfig {
    fn default() -> Self {
        Self {
            client_id: DEFAULT_CLIENT_ID.to_string(),
            scopes: DEFAULT_SCOPES.to_string(),
            oauth_url: DEFAULT_OAUTH_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(10),
            bulk_timeout: Duration::from_secs(15),
            page_size: 100,
            slow_down_increment: Duration::from_secs(5),
            delete_delay: Duration::from_millis(500),
            accessible: false,
            open_browser: true,
            include_private: true,
            token: None,
        }
    }
}

impl PurgeConfig {
    /// Load from environment variables (after reading `.env` if present).
    pub fn from_env() -> Self {
        load_dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup, falling back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(client_id) = non_empty("PURGE_CLIENT_ID") {
            config.client_id = client_id;
        }
        if let Some(scopes) = non_empty("PURGE_SCOPES") {
            config.scopes = scopes;
        }
        if let Some(url) = non_empty("PURGE_OAUTH_URL") {
            config.oauth_url = url;
        }
        if let Some(url) = non_empty("PURGE_API_URL") {
            config.api_url = url;
        }
        if let Some(flag) = non_empty("ACCESSIBLE") {
            config.accessible = parse_flag(&flag);
        }
        config.token = non_empty("PURGE_TOKEN");
        config
    }

    /// Reject settings that would make the run misbehave.
    pub fn validate(&self) -> Result<()> {
        if self.client_id.trim().is_empty() {
            return Err(PurgeError::Configuration("client id must not be empty".into()));
        }
        if self.page_size == 0 {
            return Err(PurgeError::Configuration("page size must be at least 1".into()));
        }
        for (name, url) in [("oauth url", &self.oauth_url), ("api url", &self.api_url)] {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(PurgeError::Configuration(format!(
                    "{name} must be an http(s) URL, got '{url}'"
                )));
            }
        }
        Ok(())
    }
}

/// Merge a `.env` file into the process environment. Existing variables win.
pub fn load_dotenv() {
    let _ = dotenvy::dotenv(); // .env is optional
}

fn parse_flag(value: &str) -> bool {
    !matches!(value.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no" | "off")
}
