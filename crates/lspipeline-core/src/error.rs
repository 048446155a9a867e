//! Error types for the `lspipeline` core library.

use thiserror::Error;

/// Result type alias using the `lspipeline` [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Failure reported by the pipeline collaborator (listing or polling).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{operation} failed: {message}")]
pub struct RemoteError {
    /// Remote operation that failed, e.g. `"GetPipelineState"`.
    pub operation: String,
    pub message: String,
}

impl RemoteError {
    pub fn new(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

/// Terminal surface failures. All of them are unrecoverable.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Entering raw mode / alternate screen failed.
    #[error("Failed to initialize terminal: {0}")]
    Init(String),

    /// Writing a frame to the terminal failed.
    #[error("Failed to draw frame: {0}")]
    Draw(String),

    /// Restoring the terminal failed.
    #[error("Failed to restore terminal: {0}")]
    Finalize(String),

    /// A second screen handle was requested in the same process.
    #[error("Terminal screen is already in use")]
    AlreadyAcquired,
}

/// Umbrella error for `lspipeline` operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    Render(#[from] RenderError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
