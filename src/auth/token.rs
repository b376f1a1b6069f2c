use std::fmt;

/// Bearer credential held in memory for the lifetime of one run.
///
/// Never serialized; `Debug` output is redacted so the value cannot leak into
/// logs.
///
/// # Example
/// ```
/// use gh_purge::auth::AccessToken;
///
/// let token = AccessToken::new("gho_secret");
/// assert_eq!(token.secret(), "gho_secret");
/// assert!(!format!("{token:?}").contains("gho_secret"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Raw token value for the `Authorization` header.
    pub fn secret(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessToken").field(&"<redacted>").finish()
    }
}
