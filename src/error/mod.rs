//! Error types for Assisto.

use thiserror::Error;

/// Prefix shown to the end user in front of any failed exchange.
pub const APOLOGY: &str = "Sorry, I couldn't process your request.";

/// Detail used when a failing server response carries no readable `detail`.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Primary error type for all Assisto operations.
#[derive(Error, Debug)]
pub enum AssistoError {
    /// The caller tried to send something that must never reach the network.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Server error: {status} - {detail}")]
    Server { status: u16, detail: String },

    /// Network unreachable, timeout, or a body that is not the expected JSON.
    #[error("Transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl AssistoError {
    /// Create a server error from a status code and detail text.
    pub fn server(status: u16, detail: impl Into<String>) -> Self {
        Self::Server {
            status,
            detail: detail.into(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Text shown in the transcript when an exchange fails.
    pub fn user_message(&self) -> String {
        format!("{APOLOGY} {self}")
    }
}

impl From<reqwest::Error> for AssistoError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(Box::new(err))
    }
}

impl From<serde_json::Error> for AssistoError {
    fn from(err: serde_json::Error) -> Self {
        Self::Transport(Box::new(err))
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, AssistoError>;
