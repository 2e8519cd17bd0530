use cafe_storefront::lifecycle::{StorefrontConfig, StorefrontSystem};
use cafe_storefront::model::{OrderId, OrderStatus, OrderTrackingInfo};
use cafe_storefront::tracker::{MockOrderLookup, OrderTracker, TrackerSettings};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{self, Instant};

fn info(status: OrderStatus) -> OrderTrackingInfo {
    OrderTrackingInfo::new("ord_42", status)
}

fn order() -> OrderId {
    OrderId::from("ord_42")
}

/// Initial fetch at t=0, then one refresh every 30 seconds.
#[tokio::test(start_paused = true)]
async fn test_refreshes_every_thirty_seconds() {
    let lookup = Arc::new(
        MockOrderLookup::new()
            .respond(info(OrderStatus::Confirmed))
            .respond(info(OrderStatus::Preparing).with_estimate(5))
            .respond(info(OrderStatus::Ready)),
    );
    let tracker = OrderTracker::start(order(), lookup.clone(), TrackerSettings::default());
    let mut rx = tracker.subscribe();
    let started = Instant::now();

    rx.changed().await.unwrap();
    assert_eq!(rx.borrow().info.as_ref().map(|i| i.status), Some(OrderStatus::Confirmed));

    rx.changed().await.unwrap();
    assert_eq!(started.elapsed(), Duration::from_secs(30));
    {
        let view = rx.borrow_and_update();
        let progress = view.progress.as_ref().unwrap();
        assert_eq!(progress.completed_count(), 2);
        assert_eq!(progress.current().and_then(|s| s.estimated_minutes), Some(5));
    }

    rx.changed().await.unwrap();
    assert_eq!(started.elapsed(), Duration::from_secs(60));
    assert_eq!(lookup.calls(), 3);

    tracker.stop().await.unwrap();
}

/// A response still in flight when the tracker stops never reaches the view.
#[tokio::test(start_paused = true)]
async fn test_late_response_after_stop_is_discarded() {
    let lookup = Arc::new(
        MockOrderLookup::new()
            .respond(info(OrderStatus::Confirmed))
            .respond_after(Duration::from_secs(8), info(OrderStatus::Completed)),
    );
    let tracker = OrderTracker::start(order(), lookup.clone(), TrackerSettings::default());
    let mut rx = tracker.subscribe();
    rx.changed().await.unwrap();

    // Second lookup starts at t=30 and would answer at t=38.
    time::sleep(Duration::from_secs(32)).await;
    assert_eq!(lookup.calls(), 2);
    tracker.stop().await.unwrap();

    time::sleep(Duration::from_secs(120)).await;
    assert!(!rx.has_changed().unwrap_or(false));
    assert_eq!(rx.borrow().info.as_ref().map(|i| i.status), Some(OrderStatus::Confirmed));
    assert_eq!(lookup.calls(), 2);
}

/// Identical answers do not wake subscribers.
#[tokio::test(start_paused = true)]
async fn test_identical_polls_do_not_notify() {
    let lookup = Arc::new(MockOrderLookup::new().respond(info(OrderStatus::Preparing)));
    let tracker = OrderTracker::start(order(), lookup.clone(), TrackerSettings::default());
    let mut rx = tracker.subscribe();
    rx.changed().await.unwrap();
    rx.borrow_and_update();

    time::sleep(Duration::from_secs(95)).await;
    assert_eq!(lookup.calls(), 4);
    assert!(!rx.has_changed().unwrap());

    tracker.stop().await.unwrap();
}

/// A failure keeps the last known status and polling carries on.
#[tokio::test(start_paused = true)]
async fn test_failure_keeps_status_and_polling_continues() {
    let lookup = Arc::new(
        MockOrderLookup::new()
            .respond(info(OrderStatus::Preparing))
            .fail(503, "unavailable")
            .respond(info(OrderStatus::Ready)),
    );
    let tracker = OrderTracker::start(order(), lookup.clone(), TrackerSettings::default());
    let mut rx = tracker.subscribe();

    rx.changed().await.unwrap();
    rx.changed().await.unwrap();
    {
        let view = rx.borrow_and_update();
        assert!(view.has_error());
        assert_eq!(view.info.as_ref().map(|i| i.status), Some(OrderStatus::Preparing));
    }

    rx.changed().await.unwrap();
    let view = tracker.view();
    assert!(!view.has_error());
    assert_eq!(view.info.map(|i| i.status), Some(OrderStatus::Ready));

    tracker.stop().await.unwrap();
}

/// The very first lookup failing leaves the view loading, with the error shown.
#[tokio::test(start_paused = true)]
async fn test_first_failure_stays_loading() {
    let lookup = Arc::new(MockOrderLookup::new().fail(404, "no such order"));
    let tracker = OrderTracker::start(order(), lookup, TrackerSettings::default());
    let mut rx = tracker.subscribe();

    rx.changed().await.unwrap();
    let view = tracker.view();
    assert!(view.is_loading());
    assert!(view.progress.is_none());
    assert!(view.last_error.unwrap().contains("404"));
}

/// Cancelled orders render as their own terminal state.
#[tokio::test(start_paused = true)]
async fn test_cancelled_order() {
    let lookup = Arc::new(MockOrderLookup::new().respond(info(OrderStatus::Cancelled)));
    let tracker = OrderTracker::start(order(), lookup, TrackerSettings::default());
    let mut rx = tracker.subscribe();

    rx.changed().await.unwrap();
    let progress = tracker.view().progress.unwrap();
    assert!(progress.cancelled);
    assert_eq!(progress.completed_count(), 0);
    assert!(progress.current().is_none());

    tracker.stop().await.unwrap();
}

/// Dropping the handle without `stop` still ends polling.
#[tokio::test(start_paused = true)]
async fn test_drop_cancels_polling() {
    let lookup = Arc::new(MockOrderLookup::new().respond(info(OrderStatus::Confirmed)));
    let tracker = OrderTracker::start(order(), lookup.clone(), TrackerSettings::default());
    let mut rx = tracker.subscribe();
    rx.changed().await.unwrap();

    drop(tracker);
    time::sleep(Duration::from_secs(300)).await;
    assert_eq!(lookup.calls(), 1);
}

/// The system wires the configured schedule into its trackers.
#[tokio::test(start_paused = true)]
async fn test_system_uses_configured_interval() {
    let config = StorefrontConfig {
        poll_interval_secs: 5,
        ..StorefrontConfig::default()
    };
    let system = StorefrontSystem::new(config).unwrap();
    let lookup = Arc::new(MockOrderLookup::new().respond(info(OrderStatus::Confirmed)));
    let tracker = system.track_order(order(), lookup.clone());

    time::sleep(Duration::from_secs(12)).await;
    assert_eq!(lookup.calls(), 3);

    tracker.stop().await.unwrap();
    system.shutdown().await.unwrap();
}
