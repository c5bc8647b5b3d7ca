//! Failure taxonomy for backend API calls.

use thiserror::Error;

/// What went wrong talking to the backend.
///
/// `Status` keeps the raw status code plus its canonical reason phrase so the
/// UI can pick between a status-specific message (the auth cold-start case),
/// the reason text, and a per-action fallback. `Transport` covers everything
/// below HTTP: DNS, refused connections, closed sockets, bad JSON framing.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{}", status_text.as_deref().unwrap_or("request rejected"))]
    Status {
        status: u16,
        status_text: Option<String>,
    },
    #[error("{0}")]
    Transport(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    pub fn from_status(status: reqwest::StatusCode) -> Self {
        Self::Status {
            status: status.as_u16(),
            status_text: status.canonical_reason().map(str::to_string),
        }
    }

    /// HTTP server-error class (5xx).
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Status { status, .. } if (500..600).contains(status))
    }

    /// Reason phrase of a status failure, if the status has one.
    pub fn status_text(&self) -> Option<&str> {
        match self {
            Self::Status { status_text, .. } => status_text.as_deref(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
