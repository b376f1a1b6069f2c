//! GitHub REST API: repository listing, deletion and identity lookup.

pub mod github;
pub mod http;
pub mod types;

pub use github::GitHubClient;
pub use types::{Identity, Repository};

use async_trait::async_trait;

use crate::auth::AccessToken;
use crate::error::PurgeError;

/// Bearer-authenticated repository operations used by the workflow.
#[async_trait]
pub trait RepositoryApi: Send + Sync {
    async fn fetch_identity(&self, token: &AccessToken) -> Result<Identity, PurgeError>;

    /// Every repository, all pages concatenated in request order.
    ///
    /// Fails as a whole if any page fails; partial listings are never returned.
    async fn list_repositories(&self, token: &AccessToken) -> Result<Vec<Repository>, PurgeError>;

    /// Succeeds only on `204 No Content`.
    async fn delete_repository(&self, token: &AccessToken, full_name: &str) -> Result<(), PurgeError>;
}
