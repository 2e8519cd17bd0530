//! # Checkout
//!
//! [`CheckoutFlow::begin`] turns a cart into a hosted payment session;
//! [`CheckoutFlow::confirm`] runs when the customer returns from a successful payment.

pub mod error;
pub mod flow;

pub use error::*;
pub use flow::*;
