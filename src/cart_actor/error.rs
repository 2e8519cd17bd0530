//! Error types for the Cart actor.

use thiserror::Error;

/// Errors that can occur during cart operations.
///
/// The reducer itself never fails; these come from addressing a session that does not
/// exist or from the actor being unreachable.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    /// No cart is open for the session.
    #[error("Cart session not found: {0}")]
    SessionNotFound(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for CartError {
    fn from(msg: String) -> Self {
        CartError::ActorCommunicationError(msg)
    }
}
