//! Credential front-ends: device-code login and personal access token.

use std::io::Write;

use super::AuthMode;
use crate::auth::{authorize_device, AccessToken, DeviceAuthority, DeviceAuthorization, PollProgress};
use crate::config::PurgeConfig;
use crate::error::{PurgeError, Result};
use crate::workflow::Prompter;

/// Obtain an access token using the selected front-end.
pub async fn obtain_token<A, P>(
    mode: AuthMode,
    authority: &A,
    config: &PurgeConfig,
    prompter: &mut P,
) -> Result<AccessToken>
where
    A: DeviceAuthority + ?Sized,
    P: Prompter + ?Sized,
{
    match mode {
        AuthMode::Device => device_login(authority, config, prompter).await,
        AuthMode::Token => token_login(config, prompter),
    }
}

/// Ask to proceed, show the user code, open the browser and wait for the grant.
pub async fn device_login<A, P>(
    authority: &A,
    config: &PurgeConfig,
    prompter: &mut P,
) -> Result<AccessToken>
where
    A: DeviceAuthority + ?Sized,
    P: Prompter + ?Sized,
{
    let proceed = prompter.confirm(
        "GitHub Authentication: this will open GitHub in your browser to authenticate. Proceed?",
        true,
    )?;
    if !proceed {
        return Err(PurgeError::UserCancelled);
    }

    let open_browser = config.open_browser;
    let token = authorize_device(
        authority,
        config.slow_down_increment,
        |authorization| present(authorization, open_browser),
        show_progress,
    )
    .await;
    eprintln!();
    Ok(token?)
}

fn present(authorization: &DeviceAuthorization, open_browser: bool) {
    let url = authorization.verification_uri();
    crate::info!("Your device code: {}", console::style(authorization.user_code()).bold());
    if open_browser {
        crate::info!("Opening: {url}");
        if let Err(error) = open::that(url) {
            tracing::debug!(error = %error, "failed to launch browser");
            crate::warning!("Failed to open browser automatically");
            crate::info!("Please manually visit: {url}");
        }
    } else {
        crate::info!("Please visit: {url}");
    }
    crate::info!("Waiting for authentication...");
}

fn show_progress(progress: PollProgress) {
    if let Some(mark) = progress_mark(progress) {
        eprint!("{mark}");
        let _ = std::io::stderr().flush();
    }
}

/// One dot per pending tick; slow-downs and retried polls stay silent.
pub fn progress_mark(progress: PollProgress) -> Option<char> {
    match progress {
        PollProgress::Pending => Some('.'),
        PollProgress::SlowDown { .. } | PollProgress::Retrying => None,
    }
}

/// Use `PURGE_TOKEN` when set, otherwise prompt for a token without echo.
pub fn token_login<P>(config: &PurgeConfig, prompter: &mut P) -> Result<AccessToken>
where
    P: Prompter + ?Sized,
{
    let raw = match &config.token {
        Some(token) => token.clone(),
        None => prompter.secret("GitHub personal access token (needs repo and delete_repo)")?,
    };
    let token = AccessToken::new(raw.trim());
    if token.is_empty() {
        return Err(PurgeError::Configuration("no access token provided".to_string()));
    }
    Ok(token)
}
