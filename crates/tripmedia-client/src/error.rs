//! Handshake error types.

use reqwest::StatusCode;

/// Errors surfaced by the upload handshake.
///
/// Nothing here is retried or reconciled; callers decide what to surface.
/// A backend authorization denial arrives as [`HandshakeError::Status`] and
/// is not treated differently from any other failed request.
#[derive(Debug, thiserror::Error)]
pub enum HandshakeError {
    /// Network failure, or a response body that could not be read or parsed
    /// as JSON.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Backend answered with a non-success status.
    #[error("Backend returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// Request failed client-side validation before it was sent.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// File metadata required for a completion report was never stamped.
    /// Reports are only valid for files that completed a transfer under an
    /// issued descriptor.
    #[error("Missing upload metadata: {0}")]
    MissingMeta(&'static str),

    /// HTTP client construction failed.
    #[error("Failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Result type for handshake operations
pub type HandshakeResult<T> = Result<T, HandshakeError>;
