//! OAuth device-code flow: grant details, token, and the polling loop.

pub mod device_code;
pub mod error;
pub mod flow;
pub mod token;

pub use device_code::{
    AccessTokenResponse, DeviceAuthorization, DeviceCodeResponse, PollErrorCode, TokenPoll,
    DEFAULT_EXPIRES_IN_SECS, DEFAULT_POLL_INTERVAL_SECS,
};
pub use error::AuthError;
pub use flow::{
    authorize_device, poll_for_token, DeviceAuthority, DeviceFlowOutcome, PollProgress, PollState,
};
pub use token::AccessToken;
