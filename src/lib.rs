//! gh-purge: authenticate with GitHub and bulk-delete repositories.
//!
//! A run authenticates through the OAuth device-code flow (or a personal
//! access token), lists every repository of the account, lets the user pick a
//! subset, asks for two confirmations and then deletes the picks one at a
//! time, collecting a per-repository outcome.
//!
//! # Quick Start
//!
//! ```no_run
//! use gh_purge::api::GitHubClient;
//! use gh_purge::auth::authorize_device;
//! use gh_purge::config::PurgeConfig;
//! use gh_purge::workflow::{PlainPrompter, PurgeWorkflow, WorkflowSettings};
//!
//! # async fn example() -> gh_purge::error::Result<()> {
//! let config = PurgeConfig::from_env();
//! let client = GitHubClient::new(&config)?;
//! let token = authorize_device(
//!     &client,
//!     config.slow_down_increment,
//!     |auth| println!("Visit {} and enter {}", auth.verification_uri(), auth.user_code()),
//!     |_| {},
//! )
//! .await?;
//!
//! let mut prompter = PlainPrompter::stdio();
//! let summary = PurgeWorkflow::new(&client, &mut prompter, WorkflowSettings::from(&config))
//!     .run(&token)
//!     .await?;
//! std::process::exit(summary.exit_code());
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod report;
pub mod ui;
pub mod workflow;

#[cfg(feature = "cli")]
pub mod cli;
