//! Logging setup using tracing_subscriber.

use std::io::IsTerminal;
use std::sync::Once;

use tracing_subscriber::{filter::LevelFilter, EnvFilter};

pub const PURGE_LOG_ENV_VAR: &str = "PURGE_LOG";

/// Initialize the stderr subscriber once; level comes from `PURGE_LOG`.
pub fn init() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let env_filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .with_env_var(PURGE_LOG_ENV_VAR)
            .from_env_lossy();

        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_ansi(std::io::stderr().is_terminal())
            .init();
    });
}
