//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the `tracing-subscriber` formatter used by the demo binary.
//!
//! ## Configuration
//!
//! Log levels come from `RUST_LOG`. The compact format hides the module prefix
//! (`with_target(false)`); actor logs carry an `entity_type` field instead.
//!
//! ```bash
//! # Lifecycle events, status changes, failures
//! RUST_LOG=info cargo run
//!
//! # Every cart request with its payload, every poll
//! RUST_LOG=debug cargo run
//!
//! # Only the tracker
//! RUST_LOG=cafe_storefront::tracker=debug cargo run
//! ```
//!
//! ## What Gets Traced
//!
//! - **Cart actor**: startup, session open/close, each action (`debug` carries the action),
//!   shutdown with the number of carts still open
//! - **Checkout**: rejected customer details, gateway failures, the created session
//! - **Tracker**: start/stop, status changes at `info`, unchanged polls at `debug`,
//!   failed lookups at `warn` with a `transient` flag
//!
//! With `RUST_LOG=info`:
//!
//! ```text
//! INFO Actor started entity_type="Cart"
//! INFO Created entity_type="Cart" id=session_1 size=1
//! INFO add_item{session=SessionId(1) item=hot-1}: Action ok entity_type="Cart" id=session_1
//! INFO Tracking started order_id=ord_42 interval=30s
//! INFO Order status updated order_id=ord_42 status=preparing
//! WARN Order lookup failed order_id=ord_42 error=Order lookup timed out after 10s transient=true
//! ```

/// Installs a global compact subscriber filtered by `RUST_LOG`.
///
/// Panics if a global subscriber is already set; call it once, at startup.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
