use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use strum::EnumString;

use super::{AccessToken, AuthError};

/// Poll period used when the server omits `interval` or sends a non-positive one.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;
/// Device-code lifetime used when the server omits `expires_in`.
pub const DEFAULT_EXPIRES_IN_SECS: u64 = 900;

/// Device-code grant details returned by the authorization server.
///
/// Constructed only through [`DeviceAuthorization::new`] or
/// [`DeviceAuthorization::from_response`], both of which normalize the timing
/// fields so `interval()` is never zero.
///
/// # Example
/// ```
/// use gh_purge::auth::DeviceAuthorization;
///
/// let auth = DeviceAuthorization::new(
///     "device-123",
///     "ABCD-EFGH",
///     "https://github.com/login/device",
///     None,
///     Some(0),
/// )?;
/// assert_eq!(auth.interval().as_secs(), 5);
/// assert_eq!(auth.expires_in().as_secs(), 900);
/// # Ok::<(), gh_purge::auth::AuthError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceAuthorization {
    device_code: String,
    user_code: String,
    verification_uri: String,
    expires_in: Duration,
    interval: Duration,
}

impl DeviceAuthorization {
    pub fn new(
        device_code: impl Into<String>,
        user_code: impl Into<String>,
        verification_uri: impl Into<String>,
        expires_in: Option<i64>,
        interval: Option<i64>,
    ) -> Result<Self, AuthError> {
        let device_code = device_code.into();
        let user_code = user_code.into();
        let verification_uri = verification_uri.into();
        if device_code.is_empty() || user_code.is_empty() || verification_uri.is_empty() {
            return Err(AuthError::MalformedResponse(
                "device code response is missing device_code, user_code or verification_uri"
                    .to_string(),
            ));
        }
        Ok(Self {
            device_code,
            user_code,
            verification_uri,
            expires_in: Duration::from_secs(positive_or(expires_in, DEFAULT_EXPIRES_IN_SECS)),
            interval: Duration::from_secs(positive_or(interval, DEFAULT_POLL_INTERVAL_SECS)),
        })
    }

    pub fn from_response(response: DeviceCodeResponse) -> Result<Self, AuthError> {
        Self::new(
            response.device_code.unwrap_or_default(),
            response.user_code.unwrap_or_default(),
            response.verification_uri.unwrap_or_default(),
            response.expires_in,
            response.interval,
        )
    }

    pub fn device_code(&self) -> &str {
        &self.device_code
    }

    pub fn user_code(&self) -> &str {
        &self.user_code
    }

    pub fn verification_uri(&self) -> &str {
        &self.verification_uri
    }

    pub fn expires_in(&self) -> Duration {
        self.expires_in
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

fn positive_or(value: Option<i64>, default: u64) -> u64 {
    match value {
        Some(v) if v >= 1 => v as u64,
        _ => default,
    }
}

/// Raw body of `POST /login/device/code`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeviceCodeResponse {
    pub device_code: Option<String>,
    pub user_code: Option<String>,
    pub verification_uri: Option<String>,
    pub expires_in: Option<i64>,
    pub interval: Option<i64>,
}

/// Raw body of `POST /login/oauth/access_token`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccessTokenResponse {
    pub access_token: Option<String>,
    pub token_type: Option<String>,
    pub scope: Option<String>,
    pub error: Option<String>,
}

/// OAuth error codes defined for the device-code grant.
#[derive(Debug, Clone, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum PollErrorCode {
    AuthorizationPending,
    SlowDown,
    ExpiredToken,
    AccessDenied,
    #[strum(default)]
    Other(String),
}

/// Single-shot result of one token poll, consumed by the polling loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenPoll {
    Pending,
    SlowDown,
    ExpiredToken,
    AccessDenied,
    Rejected(String),
    Granted(AccessToken),
    /// Neither a token nor an error was present.
    Empty,
}

impl AccessTokenResponse {
    pub fn classify(self) -> TokenPoll {
        let error = self.error.unwrap_or_default();
        if !error.is_empty() {
            return match PollErrorCode::from_str(&error) {
                Ok(PollErrorCode::AuthorizationPending) => TokenPoll::Pending,
                Ok(PollErrorCode::SlowDown) => TokenPoll::SlowDown,
                Ok(PollErrorCode::ExpiredToken) => TokenPoll::ExpiredToken,
                Ok(PollErrorCode::AccessDenied) => TokenPoll::AccessDenied,
                Ok(PollErrorCode::Other(other)) => TokenPoll::Rejected(other),
                Err(_) => TokenPoll::Rejected(error),
            };
        }
        match self.access_token {
            Some(token) if !token.is_empty() => TokenPoll::Granted(AccessToken::new(token)),
            _ => TokenPoll::Empty,
        }
    }
}
