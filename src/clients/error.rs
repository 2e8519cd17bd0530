//! Errors raised by the external collaborators (payment sessions, order lookup).

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// Connection, TLS, or body decoding failure.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("Service responded with status {status}: {message}")]
    Status { status: u16, message: String },

    /// No answer within the configured timeout.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
}

impl GatewayError {
    /// Failures worth retrying on the next poll.
    pub fn is_transient(&self) -> bool {
        match self {
            GatewayError::Http(e) => e.is_timeout() || e.is_connect(),
            GatewayError::Status { status, .. } => *status >= 500 || *status == 429,
            GatewayError::Timeout(_) => true,
        }
    }
}
