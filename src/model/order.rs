//! Order fulfilment status as reported by the order service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Identifier assigned to an order by the order service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fulfilment status of an order.
///
/// `Pending` precedes the stage sequence (payment not yet confirmed); `Cancelled` is a
/// terminal value outside of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    Ready,
    Completed,
    Cancelled,
}

/// The stages an order passes through, in order.
pub const STAGE_SEQUENCE: [OrderStatus; 4] = [
    OrderStatus::Confirmed,
    OrderStatus::Preparing,
    OrderStatus::Ready,
    OrderStatus::Completed,
];

impl OrderStatus {
    /// Position in [`STAGE_SEQUENCE`], or `None` for `Pending` and `Cancelled`.
    pub fn stage_index(self) -> Option<usize> {
        STAGE_SEQUENCE.iter().position(|stage| *stage == self)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One authoritative snapshot of an order, replaced wholesale by the next poll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTrackingInfo {
    pub order_id: OrderId,
    pub status: OrderStatus,
    #[serde(rename = "estimatedTime", default, skip_serializing_if = "Option::is_none")]
    pub estimated_minutes: Option<u32>,
    pub last_updated: DateTime<Utc>,
}

impl OrderTrackingInfo {
    pub fn new(order_id: impl Into<String>, status: OrderStatus) -> Self {
        Self {
            order_id: OrderId(order_id.into()),
            status,
            estimated_minutes: None,
            last_updated: Utc::now(),
        }
    }

    pub fn with_estimate(mut self, minutes: u32) -> Self {
        self.estimated_minutes = Some(minutes);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_index() {
        assert_eq!(OrderStatus::Confirmed.stage_index(), Some(0));
        assert_eq!(OrderStatus::Completed.stage_index(), Some(3));
        assert_eq!(OrderStatus::Pending.stage_index(), None);
        assert_eq!(OrderStatus::Cancelled.stage_index(), None);
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(OrderStatus::Completed.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(!OrderStatus::Ready.is_terminal());
    }

    #[test]
    fn test_parses_order_service_payload() {
        let payload = r#"{
            "orderId": "ord_42",
            "status": "preparing",
            "estimatedTime": 6,
            "lastUpdated": "2024-05-01T09:30:00Z"
        }"#;
        let info: OrderTrackingInfo = serde_json::from_str(payload).unwrap();

        assert_eq!(info.order_id, OrderId::from("ord_42"));
        assert_eq!(info.status, OrderStatus::Preparing);
        assert_eq!(info.estimated_minutes, Some(6));
        assert_eq!(info.last_updated.to_rfc3339(), "2024-05-01T09:30:00+00:00");
    }

    #[test]
    fn test_estimate_is_optional() {
        let payload = r#"{"orderId":"o","status":"cancelled","lastUpdated":"2024-05-01T09:30:00Z"}"#;
        let info: OrderTrackingInfo = serde_json::from_str(payload).unwrap();
        assert_eq!(info.status, OrderStatus::Cancelled);
        assert_eq!(info.estimated_minutes, None);
    }
}
