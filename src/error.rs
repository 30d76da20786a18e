//! Error taxonomy for the answer pipeline.
//!
//! None of these ever reach a visitor: [`crate::responder`] converts every
//! failure into readable text. They exist so callers and logs can tell the
//! failure modes apart.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatError {
    /// One document could not be read. Non-fatal; the document is omitted.
    #[error("failed to load document {path}: {reason}")]
    DocumentLoad { path: String, reason: String },

    /// The completion service answered with a non-success status or a body
    /// that could not be interpreted.
    #[error("completion service error {status}: {message}")]
    Service { status: u16, message: String },

    /// The request never produced a response (connect failure, timeout).
    #[error("completion request failed: {0}")]
    Transport(String),

    /// No usable endpoint or credential is configured.
    #[error("completion service not configured: {0}")]
    ConfigurationMissing(String),
}

impl ChatError {
    /// Whether a retry has a chance of succeeding.
    ///
    /// Rate limiting, server errors and transport failures are transient;
    /// other client errors are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            ChatError::Service { status, .. } => *status == 429 || *status >= 500,
            ChatError::Transport(_) => true,
            _ => false,
        }
    }
}

pub type ChatResult<T> = std::result::Result<T, ChatError>;
