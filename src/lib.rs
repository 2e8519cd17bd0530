//! # Café Storefront
//!
//! > **The stateful core of a coffee-shop storefront.**
//!
//! Two components, sharing no state:
//! - the **cart**: what a customer intends to buy, with subtotal, tax and total;
//! - the **order tracker**: a polling observer of one order's fulfilment stage.
//!
//! ## 🏗️ Design
//!
//! ### Carts live in an actor
//! Every open cart is an entity of a generic [`ResourceActor`](framework::ResourceActor).
//! The actor processes requests one at a time, so add, remove, update-quantity and clear
//! apply in the order they were issued, with no locks. After each change it publishes the
//! new cart on a broadcast channel; views subscribe through
//! [`CartClient::subscribe`](clients::CartClient::subscribe).
//!
//! ### Totals are derived, never patched
//! [`CartState::apply`](model::CartState::apply) recomputes the subtotal from the lines
//! after every mutation. Amounts stay at full precision; rounding to cents happens only
//! when a [`Money`](model::Money) is displayed.
//!
//! ### Trackers own their poll task
//! [`OrderTracker`](tracker::OrderTracker) spawns one task per tracked order and publishes
//! a [`TrackingView`](tracker::TrackingView) on a `watch` channel. Stopping the tracker
//! joins the task; a lookup still in flight is discarded.
//!
//! ### Context injection
//! The tax rate is configuration, handed to the cart actor through `run(context)` rather
//! than baked into cart logic.
//!
//! ## 🗺️ Module Tour
//!
//! - [`framework`]: generic actor, client, change events and the mock client
//! - [`model`]: menu, money, cart reducer, order status, customer validation
//! - [`cart_actor`]: the cart entity
//! - [`clients`]: [`CartClient`](clients::CartClient) and the HTTP collaborators
//!   (checkout gateway, order lookup)
//! - [`checkout`]: [`CheckoutFlow`](checkout::CheckoutFlow)
//! - [`tracker`]: [`OrderTracker`](tracker::OrderTracker) and stage rendering
//! - [`lifecycle`]: [`StorefrontConfig`](lifecycle::StorefrontConfig),
//!   [`StorefrontSystem`](lifecycle::StorefrontSystem), tracing setup
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Fill a cart from the menu
//! RUST_LOG=info cargo run
//!
//! # ...and follow an order for one poll cycle
//! RUST_LOG=info cargo run -- ord_42
//!
//! cargo test
//! ```

pub mod cart_actor;
pub mod checkout;
pub mod clients;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod tracker;
