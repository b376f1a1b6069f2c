//! CLI entry point for gh-purge.

pub mod auth;
pub mod logging;

use clap::{Parser, ValueEnum};

use crate::config::PurgeConfig;

/// Authenticate with GitHub and select repositories to delete
#[derive(Parser, Debug)]
#[command(name = "gh-purge", version, about = "Authenticate with GitHub and bulk-delete repositories")]
pub struct Cli {
    /// Line-based prompts without colors (also enabled by ACCESSIBLE=1)
    #[arg(long)]
    pub accessible: bool,

    /// Print the verification URL instead of opening a browser
    #[arg(long)]
    pub no_browser: bool,

    /// How to obtain the access token
    #[arg(long, value_enum, env = "PURGE_AUTH", default_value_t = AuthMode::Device)]
    pub auth: AuthMode,

    /// Hide private repositories from the selection list
    #[arg(long)]
    pub public_only: bool,
}

/// Credential front-ends feeding the same workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AuthMode {
    /// OAuth device-code flow in the browser
    Device,
    /// Personal access token from PURGE_TOKEN or a hidden prompt
    Token,
}

impl Cli {
    /// Layer flags over an env-derived config.
    pub fn apply(&self, config: &mut PurgeConfig) {
        if self.accessible {
            config.accessible = true;
        }
        if self.no_browser {
            config.open_browser = false;
        }
        if self.public_only {
            config.include_private = false;
        }
    }
}
