//! Request failure taxonomy for the HTTP client.
//!
//! ERROR HANDLING
//! ==============
//! Authentication failures (401/403) get their own variants because the
//! response interceptor escalates them globally; call sites only need to
//! log them. Everything else is surfaced at the call site as a notice.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Errors produced by [`crate::net::http::ApiClient`] operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (network down, CORS, abort).
    #[error("request failed: {0}")]
    Transport(String),

    /// The backend answered 401.
    #[error("not authenticated")]
    Unauthorized,

    /// The backend answered 403.
    #[error("access denied")]
    Forbidden,

    /// Any other non-success status.
    #[error("request failed with status {status}")]
    Status { status: u16, body: String },

    /// The response body did not match the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),

    /// HTTP is only available in the browser build.
    #[error("not available on server")]
    Unavailable,
}

impl ApiError {
    /// Map a non-success status into the matching variant.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            _ => Self::Status { status, body },
        }
    }

    /// Whether this failure belongs to the authentication class.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Unauthorized | Self::Forbidden)
    }

    /// HTTP status behind the failure, when there was a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::Forbidden => Some(403),
            Self::Status { status, .. } => Some(*status),
            Self::Transport(_) | Self::Decode(_) | Self::Unavailable => None,
        }
    }
}
