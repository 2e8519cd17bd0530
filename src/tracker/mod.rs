//! # Order Status Tracker
//!
//! Follows one order through `confirmed → preparing → ready → completed` by polling the
//! order lookup.
//!
//! - [`order_tracker`] - [`OrderTracker`], the handle that owns the poll task
//! - [`view`] - [`TrackingView`], last known status plus error indicator
//! - [`progress`] - [`ProgressView`], stage completion rendering
//! - [`mock`] - [`MockOrderLookup`], a scripted lookup for tests
//!
//! ```rust,ignore
//! let tracker = OrderTracker::start(order_id, lookup, TrackerSettings::default());
//! let mut updates = tracker.subscribe();
//! while updates.changed().await.is_ok() {
//!     println!("{:?}", updates.borrow().progress);
//! }
//! ```

pub mod error;
pub mod mock;
pub mod order_tracker;
pub mod progress;
pub mod view;

pub use error::*;
pub use mock::*;
pub use order_tracker::*;
pub use progress::*;
pub use view::*;
