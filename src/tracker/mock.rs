//! # Mock Order Lookup
//!
//! Scripted [`OrderLookup`] for tracker tests. Each call consumes the next scripted
//! response; once the script runs out the last response repeats forever. Responses can be
//! delayed, which together with a paused tokio clock makes in-flight and timeout cases
//! deterministic.
//!
//! ```ignore
//! let lookup = Arc::new(
//!     MockOrderLookup::new()
//!         .respond(OrderTrackingInfo::new("o1", OrderStatus::Confirmed))
//!         .fail(503, "unavailable"),
//! );
//! let tracker = OrderTracker::start("o1".into(), lookup.clone(), TrackerSettings::default());
//! ```

use crate::clients::{GatewayError, OrderLookup};
use crate::model::{OrderId, OrderTrackingInfo};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone)]
enum MockResponse {
    Info(OrderTrackingInfo),
    Fail { status: u16, message: String },
}

#[derive(Debug, Clone)]
struct Scripted {
    delay: Duration,
    response: MockResponse,
}

#[derive(Debug, Default)]
pub struct MockOrderLookup {
    script: Mutex<VecDeque<Scripted>>,
    last: Mutex<Option<Scripted>>,
    calls: AtomicUsize,
}

impl MockOrderLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, info: OrderTrackingInfo) -> Self {
        self.push(Duration::ZERO, MockResponse::Info(info))
    }

    /// Answers with `info` only after `delay` has elapsed.
    pub fn respond_after(self, delay: Duration, info: OrderTrackingInfo) -> Self {
        self.push(delay, MockResponse::Info(info))
    }

    /// Answers with a non-success HTTP status.
    pub fn fail(self, status: u16, message: &str) -> Self {
        self.push(
            Duration::ZERO,
            MockResponse::Fail {
                status,
                message: message.to_string(),
            },
        )
    }

    /// Number of lookups started so far, including ones still in flight.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn push(self, delay: Duration, response: MockResponse) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Scripted { delay, response });
        self
    }

    fn next_scripted(&self) -> Option<Scripted> {
        let next = self.script.lock().unwrap().pop_front();
        let mut last = self.last.lock().unwrap();
        match next {
            Some(scripted) => {
                *last = Some(scripted.clone());
                Some(scripted)
            }
            None => last.clone(),
        }
    }
}

#[async_trait]
impl OrderLookup for MockOrderLookup {
    async fn fetch(&self, order_id: &OrderId) -> Result<OrderTrackingInfo, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let Some(scripted) = self.next_scripted() else {
            return Err(GatewayError::Status {
                status: 404,
                message: format!("no such order: {order_id}"),
            });
        };

        if !scripted.delay.is_zero() {
            tokio::time::sleep(scripted.delay).await;
        }
        match scripted.response {
            MockResponse::Info(info) => Ok(info),
            MockResponse::Fail { status, message } => Err(GatewayError::Status { status, message }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OrderStatus;

    #[tokio::test]
    async fn test_script_then_repeat_last() {
        let lookup = MockOrderLookup::new()
            .fail(503, "unavailable")
            .respond(OrderTrackingInfo::new("o1", OrderStatus::Ready));
        let id = OrderId::from("o1");

        assert!(matches!(
            lookup.fetch(&id).await,
            Err(GatewayError::Status { status: 503, .. })
        ));
        for _ in 0..2 {
            assert_eq!(lookup.fetch(&id).await.unwrap().status, OrderStatus::Ready);
        }
        assert_eq!(lookup.calls(), 3);
    }

    #[tokio::test]
    async fn test_unscripted_lookup_is_not_found() {
        let lookup = MockOrderLookup::new();
        let result = lookup.fetch(&OrderId::from("missing")).await;
        assert!(matches!(result, Err(GatewayError::Status { status: 404, .. })));
    }
}
