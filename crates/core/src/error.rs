//! Typed failures from the external collaborators
//!
//! Both enums are part of the collaborator contract: the conversation engine
//! maps each kind to one fixed user-facing sentence and never surfaces the
//! raw detail strings to the user.

use thiserror::Error;

/// Failure from the places lookup collaborator
///
/// The optional payload is a human-readable detail from the provider,
/// intended for logs only.
#[derive(Debug, Clone, Error)]
pub enum LookupError {
    #[error("provider denied the request")]
    PermissionDenied(Option<String>),

    #[error("provider rejected the request as invalid")]
    InvalidRequest(Option<String>),

    #[error("provider rate limit exceeded")]
    RateLimited(Option<String>),

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("unknown provider failure")]
    Unknown(Option<String>),
}

impl LookupError {
    /// Provider-supplied detail, when any
    pub fn detail(&self) -> Option<&str> {
        match self {
            LookupError::PermissionDenied(detail)
            | LookupError::InvalidRequest(detail)
            | LookupError::RateLimited(detail)
            | LookupError::Unknown(detail) => detail.as_deref(),
            LookupError::Transport(detail) => Some(detail.as_str()),
        }
    }
}

/// Failure while acquiring the user's location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("geolocation is not supported on this device")]
    Unsupported,

    #[error("location permission denied")]
    PermissionDenied,

    #[error("location temporarily unavailable")]
    Unavailable,
}
