//! What the customer sees while an order is being tracked.

use super::progress::ProgressView;
use crate::model::{OrderId, OrderTrackingInfo};

/// Observable state of one tracked order.
///
/// `info` is the last successful lookup and is never cleared by a failure. `last_error`
/// holds the message of the most recent failure and is reset by the next success.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackingView {
    pub order_id: OrderId,
    pub info: Option<OrderTrackingInfo>,
    pub progress: Option<ProgressView>,
    pub last_error: Option<String>,
}

impl TrackingView {
    pub fn loading(order_id: OrderId) -> Self {
        Self {
            order_id,
            info: None,
            progress: None,
            last_error: None,
        }
    }

    /// No lookup has succeeded yet.
    pub fn is_loading(&self) -> bool {
        self.info.is_none()
    }

    pub fn has_error(&self) -> bool {
        self.last_error.is_some()
    }

    /// Replaces the view wholesale. Returns `false` when nothing changed.
    pub fn apply_success(&mut self, info: OrderTrackingInfo) -> bool {
        if self.info.as_ref() == Some(&info) && self.last_error.is_none() {
            return false;
        }
        self.progress = Some(ProgressView::render(&info));
        self.info = Some(info);
        self.last_error = None;
        true
    }

    /// Records a failure, keeping the last known status.
    pub fn apply_failure(&mut self, message: String) -> bool {
        if self.last_error.as_deref() == Some(message.as_str()) {
            return false;
        }
        self.last_error = Some(message);
        true
    }
}
