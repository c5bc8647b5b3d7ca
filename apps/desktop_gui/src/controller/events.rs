//! UI/backend events and the user-facing failure messages for each action.

use client_core::ApiError;
use shared::{
    domain::{UserId, ZipCode},
    protocol::Forecast,
};

pub enum UiEvent {
    Info(String),
    AuthOk {
        user_id: UserId,
        zip: Option<ZipCode>,
    },
    ZipSaved {
        zip: ZipCode,
    },
    ForecastLoaded(Forecast),
    Failure(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Register,
    Login,
    SaveZip,
    Forecast,
}

/// Shown when an auth endpoint answers with a 5xx: the hosted backend's
/// database spins down when idle and needs a moment to come back.
const COLD_START_MESSAGE: &str = "The server is temporarily unavailable. \
The database may be spinning back up; please wait one minute and try again.";

const TRANSPORT_FALLBACK: &str = "Request failed";

#[derive(Debug, Clone)]
pub struct UiError {
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn new(context: UiErrorContext, message: impl Into<String>) -> Self {
        Self {
            context,
            message: message.into(),
        }
    }

    /// Maps an API failure to the message the owning screen displays.
    ///
    /// Only the two auth endpoints get the cold-start wording for 5xx; a
    /// zip-save or forecast 5xx collapses to the action's generic fallback.
    /// Other non-success statuses surface the server's status text when the
    /// response carried one.
    pub fn from_api_error(context: UiErrorContext, err: &ApiError) -> Self {
        let message = match context {
            UiErrorContext::Register | UiErrorContext::Login if err.is_server_error() => {
                COLD_START_MESSAGE.to_string()
            }
            UiErrorContext::SaveZip | UiErrorContext::Forecast if err.is_server_error() => {
                action_fallback(context).to_string()
            }
            _ => match err {
                ApiError::Status { status_text, .. } => status_text
                    .clone()
                    .unwrap_or_else(|| action_fallback(context).to_string()),
                ApiError::Transport(message) if message.is_empty() => {
                    TRANSPORT_FALLBACK.to_string()
                }
                ApiError::Transport(message) => message.clone(),
                ApiError::InvalidResponse(_) => err.to_string(),
            },
        };
        Self { context, message }
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

fn action_fallback(context: UiErrorContext) -> &'static str {
    match context {
        UiErrorContext::Register => "Registration failed",
        UiErrorContext::Login => "Login failed",
        UiErrorContext::SaveZip => "Failed to save zip",
        UiErrorContext::Forecast => "Failed to load weather",
        UiErrorContext::BackendStartup => "Backend worker failed to start",
    }
}
