//! Device-code polling state machine.
//!
//! The loop sleeps for the current poll period, checks the overall deadline,
//! then issues one token poll. Transient failures are swallowed and retried on
//! the next tick; `slow_down` widens the period without moving the deadline.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use super::{AccessToken, AuthError, DeviceAuthorization, TokenPoll};

/// Authorization server operations needed by the device-code grant.
#[async_trait]
pub trait DeviceAuthority: Send + Sync {
    async fn request_device_code(&self) -> Result<DeviceAuthorization, AuthError>;
    async fn poll_token(&self, device_code: &str) -> Result<TokenPoll, AuthError>;
}

/// Non-terminal states of the polling loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Pending,
    SlowDown,
}

/// Progress signal emitted while the loop is still waiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollProgress {
    /// The user has not finished authorizing yet.
    Pending,
    /// The server asked for slower polling; `interval` is the new period.
    SlowDown { interval: Duration },
    /// The poll could not be completed and will be retried.
    Retrying,
}

/// Terminal result of the polling loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceFlowOutcome {
    Granted(AccessToken),
    Denied,
    Expired,
    TimedOut,
    Rejected(String),
}

impl DeviceFlowOutcome {
    /// Convert into the token or the matching [`AuthError`] kind.
    pub fn into_token(self) -> Result<AccessToken, AuthError> {
        match self {
            Self::Granted(token) => Ok(token),
            Self::Denied => Err(AuthError::Denied),
            Self::Expired => Err(AuthError::Expired),
            Self::TimedOut => Err(AuthError::Timeout),
            Self::Rejected(detail) => Err(AuthError::RemoteRejected(detail)),
        }
    }
}

/// Poll `authority` until the device code resolves to a terminal outcome.
///
/// Total wait is bounded by `authorization.expires_in()` plus at most one poll
/// period, however many `authorization_pending` answers arrive first.
pub async fn poll_for_token<A, F>(
    authority: &A,
    authorization: &DeviceAuthorization,
    slow_down_increment: Duration,
    mut on_progress: F,
) -> DeviceFlowOutcome
where
    A: DeviceAuthority + ?Sized,
    F: FnMut(PollProgress),
{
    let deadline = Instant::now() + authorization.expires_in();
    let mut interval = authorization.interval().max(Duration::from_secs(1));
    let mut state = PollState::Pending;

    loop {
        tokio::time::sleep(interval).await;

        if Instant::now() >= deadline {
            tracing::debug!(?state, "device code deadline passed");
            return DeviceFlowOutcome::TimedOut;
        }

        let poll = match authority.poll_token(authorization.device_code()).await {
            Ok(poll) => poll,
            Err(error) => {
                tracing::debug!(error = %error, "token poll failed, retrying next tick");
                on_progress(PollProgress::Retrying);
                continue;
            }
        };

        match poll {
            TokenPoll::Pending => {
                state = PollState::Pending;
                on_progress(PollProgress::Pending);
            }
            TokenPoll::SlowDown => {
                state = PollState::SlowDown;
                interval += slow_down_increment;
                tracing::debug!(interval_secs = interval.as_secs(), "slowing down token polling");
                on_progress(PollProgress::SlowDown { interval });
            }
            TokenPoll::Empty => {
                tracing::debug!(?state, "token poll returned neither token nor error");
            }
            TokenPoll::ExpiredToken => return DeviceFlowOutcome::Expired,
            TokenPoll::AccessDenied => return DeviceFlowOutcome::Denied,
            TokenPoll::Rejected(detail) => return DeviceFlowOutcome::Rejected(detail),
            TokenPoll::Granted(token) => return DeviceFlowOutcome::Granted(token),
        }
    }
}

/// Request a device code, hand it to `present`, then poll until resolved.
pub async fn authorize_device<A, P, F>(
    authority: &A,
    slow_down_increment: Duration,
    present: P,
    on_progress: F,
) -> Result<AccessToken, AuthError>
where
    A: DeviceAuthority + ?Sized,
    P: FnOnce(&DeviceAuthorization),
    F: FnMut(PollProgress),
{
    let authorization = authority.request_device_code().await?;
    present(&authorization);
    poll_for_token(authority, &authorization, slow_down_increment, on_progress)
        .await
        .into_token()
}
