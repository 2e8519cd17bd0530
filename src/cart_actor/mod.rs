//! # Cart Actor
//!
//! Holds every open cart, one per customer session, and is the single writer for all of
//! them: add, remove, update-quantity, set-note and clear requests are queued on one
//! channel and reduced in arrival order.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`Cart`]
//! - [`error`] - [`CartError`]
//! - [`actions`] - [`CartOutcome`], the answer to every cart action
//! - [`new()`] - Factory function that creates the actor and its generic client
//!
//! ## Usage
//!
//! ```rust,ignore
//! let (actor, generic_client) = cart_actor::new(32);
//! tokio::spawn(actor.run(CartContext { tax_rate: 0.08 }));
//!
//! let carts = CartClient::new(generic_client);
//! let session = carts.open_session().await?;
//! carts.add_item(session, espresso).await?;
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use entity::*;
pub use error::*;

use crate::framework::{ResourceActor, ResourceClient};

/// Creates a new Cart actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Cart>, ResourceClient<Cart>) {
    ResourceActor::new(buffer_size)
}
