//! # Order Tracker
//!
//! Polls the order lookup for one order on a fixed interval and publishes a
//! [`TrackingView`] over a `watch` channel.
//!
//! The poll task is owned by the [`OrderTracker`] handle. [`OrderTracker::stop`] signals
//! the task and waits for it; dropping the handle aborts it. Once `stop` has returned, the
//! view never changes again: the stop signal is checked ahead of both the ticker and the
//! in-flight lookup, so a response that arrives late is discarded.

use super::error::TrackerError;
use super::view::TrackingView;
use crate::clients::OrderLookup;
use crate::lifecycle::StorefrontConfig;
use crate::model::{OrderId, OrderTrackingInfo};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Poll schedule for a tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerSettings {
    pub poll_interval: Duration,
    pub request_timeout: Duration,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(30),
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl From<&StorefrontConfig> for TrackerSettings {
    fn from(config: &StorefrontConfig) -> Self {
        Self {
            poll_interval: config.poll_interval(),
            request_timeout: config.request_timeout(),
        }
    }
}

/// Handle to a running poll task for one order.
pub struct OrderTracker {
    order_id: OrderId,
    view: watch::Receiver<TrackingView>,
    stop: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl OrderTracker {
    /// Starts tracking `order_id`. The first lookup is issued immediately.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(
        order_id: OrderId,
        lookup: Arc<dyn OrderLookup>,
        settings: TrackerSettings,
    ) -> Self {
        let (view_tx, view) = watch::channel(TrackingView::loading(order_id.clone()));
        let (stop, stop_rx) = oneshot::channel();

        info!(%order_id, interval = ?settings.poll_interval, "Tracking started");
        let handle = tokio::spawn(poll_loop(
            order_id.clone(),
            lookup,
            settings,
            view_tx,
            stop_rx,
        ));

        Self {
            order_id,
            view,
            stop: Some(stop),
            handle: Some(handle),
        }
    }

    pub fn order_id(&self) -> &OrderId {
        &self.order_id
    }

    /// Snapshot of the current view.
    pub fn view(&self) -> TrackingView {
        self.view.borrow().clone()
    }

    /// Receiver that wakes on every change to the view.
    pub fn subscribe(&self) -> watch::Receiver<TrackingView> {
        self.view.clone()
    }

    /// Stops polling and waits for the poll task to exit.
    pub async fn stop(mut self) -> Result<(), TrackerError> {
        if let Some(stop) = self.stop.take() {
            // The task may already be gone; that is fine.
            let _ = stop.send(());
        }
        if let Some(handle) = self.handle.take() {
            handle
                .await
                .map_err(|e| TrackerError::TaskFailed(e.to_string()))?;
        }
        info!(order_id = %self.order_id, "Tracking stopped");
        Ok(())
    }
}

impl Drop for OrderTracker {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            debug!(order_id = %self.order_id, "Tracker dropped, aborting poll task");
            handle.abort();
        }
    }
}

async fn poll_loop(
    order_id: OrderId,
    lookup: Arc<dyn OrderLookup>,
    settings: TrackerSettings,
    view: watch::Sender<TrackingView>,
    mut stop: oneshot::Receiver<()>,
) {
    let mut ticker = time::interval(settings.poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = &mut stop => break,
            _ = ticker.tick() => {}
        }

        let outcome = tokio::select! {
            biased;
            _ = &mut stop => break,
            outcome = fetch_once(lookup.as_ref(), &order_id, settings.request_timeout) => outcome,
        };

        match outcome {
            Ok(info) => {
                let status = info.status;
                if view.send_if_modified(|v| v.apply_success(info)) {
                    info!(%order_id, %status, "Order status updated");
                } else {
                    debug!(%order_id, %status, "Order status unchanged");
                }
            }
            Err(e) => {
                let transient = match &e {
                    TrackerError::Lookup(g) => g.is_transient(),
                    _ => true,
                };
                warn!(%order_id, error = %e, transient, "Order lookup failed");
                view.send_if_modified(|v| v.apply_failure(e.to_string()));
            }
        }
    }

    debug!(%order_id, "Poll loop exited");
}

async fn fetch_once(
    lookup: &dyn OrderLookup,
    order_id: &OrderId,
    timeout: Duration,
) -> Result<OrderTrackingInfo, TrackerError> {
    match time::timeout(timeout, lookup.fetch(order_id)).await {
        Ok(result) => Ok(result?),
        Err(_) => Err(TrackerError::Timeout(timeout)),
    }
}
