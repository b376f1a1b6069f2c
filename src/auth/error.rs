use thiserror::Error;

/// Reasons the device-authorization flow could not produce a token.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Authentication timed out before the device code was authorized")]
    Timeout,
    #[error("Device code expired, please restart the flow")]
    Expired,
    #[error("Access denied by user")]
    Denied,
    #[error("OAuth error: {0}")]
    RemoteRejected(String),
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    #[error("Authorization server unavailable: {0}")]
    RemoteUnavailable(String),
}

impl From<reqwest::Error> for AuthError {
    fn from(error: reqwest::Error) -> Self {
        Self::RemoteUnavailable(error.to_string())
    }
}

impl From<serde_json::Error> for AuthError {
    fn from(error: serde_json::Error) -> Self {
        Self::MalformedResponse(error.to_string())
    }
}
