use crate::clients::GatewayError;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Order lookup failed: {0}")]
    Lookup(#[from] GatewayError),

    #[error("Order lookup timed out after {0:?}")]
    Timeout(Duration),

    #[error("Tracker task failed: {0}")]
    TaskFailed(String),
}
