//! Error types for Brainy Tutor.

use thiserror::Error;

/// Error taxonomy for the query pipeline.
///
/// `Validation` is recovered locally (the operation is rejected, session
/// state unchanged). `Transport` and `MalformedResponse` move the session to
/// the Error phase and are retryable. `Configuration` is fatal for the
/// session's lifetime and blocks submission entirely.
#[derive(Error, Debug, Clone)]
pub enum TutorError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Service request failed{}: {body}", .status.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
    Transport { status: Option<u16>, body: String },

    #[error("Unintelligible service response: {0}")]
    MalformedResponse(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl TutorError {
    /// Message suitable for direct display to the user.
    pub fn display_message(&self) -> String {
        self.to_string()
    }

    /// True for errors the user can retry by submitting again.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            TutorError::Transport { .. } | TutorError::MalformedResponse(_)
        )
    }
}
