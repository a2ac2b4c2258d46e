//! Typed error enum for the client crate.

use thiserror::Error;

/// Errors from catalog API calls and data-layer operations.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),
    /// Non-success status; `message` comes from the JSON body when present.
    #[error("{message}")]
    HttpStatus { code: u16, message: String },
    /// The response was not JSON or did not have the expected shape.
    #[error("Invalid response format: {0}")]
    Malformed(String),
    /// The request was superseded or cancelled by the caller.
    #[error("request cancelled")]
    Cancelled,
    #[error("page {page} is outside 1..={total_pages}")]
    PageOutOfRange { page: usize, total_pages: usize },
    #[error("client initialization failed: {0}")]
    ClientInit(String),
}

impl ClientError {
    /// Cancellations are expected and never surfaced as UI errors.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::HttpStatus { code: 404, .. })
    }
}
