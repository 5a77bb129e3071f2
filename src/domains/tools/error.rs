//! Tool-specific error types.

use thiserror::Error;

/// Errors that can occur during tool operations.
///
/// Every variant except `NotFound` is produced inside a tool handler and is
/// returned to the client as an error result rather than a protocol error.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool was not found.
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// The call arguments were not a string-keyed object.
    #[error("Invalid arguments object: {0}")]
    InvalidArguments(String),

    /// The outbound request could not be built (e.g. malformed URL).
    #[error("Failed to create request: {0}")]
    RequestConstructionFailed(String),

    /// The request could not be sent or no response was received.
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The response body could not be read.
    #[error("Failed to read response body: {0}")]
    BodyReadFailed(String),

    /// The remote API answered with a 4xx/5xx status. Holds the raw body.
    #[error("API error: {0}")]
    ApiError(String),

    /// Re-serializing a parsed response failed.
    #[error("Failed to format JSON: {0}")]
    JsonFormatFailed(String),
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }
}
