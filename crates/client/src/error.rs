//! Error taxonomy of the backend client.

use stockdesk_inventory::AdjustmentError;

use crate::inflight::AdjustmentTarget;

/// Notification text used when the backend gives no usable message.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Rejected locally before any request was sent.
    #[error(transparent)]
    Adjustment(#[from] AdjustmentError),
    #[error("an adjustment for {0} is already in flight")]
    InFlight(AdjustmentTarget),
    /// 401 from the backend; the session has been cleared.
    #[error("session expired; sign in again")]
    Unauthorized,
    /// 404 from the backend. `message` is the backend's text, if any.
    #[error("not found: {what}")]
    NotFound {
        what: String,
        message: Option<String>,
    },
    #[error("API error ({status}){}", detail(.message))]
    Api {
        status: u16,
        message: Option<String>,
    },
    #[error("network error: {0}")]
    Network(String),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

fn detail(message: &Option<String>) -> String {
    message.as_deref().map(|m| format!(": {m}")).unwrap_or_default()
}

impl ClientError {
    /// True for failures caught before reaching the backend.
    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Adjustment(_))
    }

    /// Text suitable for a user-facing notification.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Adjustment(e) => e.to_string(),
            ClientError::InFlight(_) => "This adjustment is already being saved.".to_string(),
            ClientError::Unauthorized => self.to_string(),
            ClientError::NotFound {
                message: Some(message),
                ..
            } => message.clone(),
            ClientError::NotFound { what, message: None } => format!("{what} was not found"),
            ClientError::Api {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            ClientError::Api { .. } | ClientError::Network(_) | ClientError::MalformedResponse(_) => {
                GENERIC_FAILURE_MESSAGE.to_string()
            }
        }
    }
}
