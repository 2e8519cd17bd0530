//! Type-safe wrappers around [`ResourceClient`](crate::framework::ResourceClient) and the
//! HTTP collaborators of the storefront.

pub mod actor_client;
pub mod cart_client;
pub mod checkout_gateway;
pub mod error;
pub mod order_lookup;

pub use actor_client::*;
pub use cart_client::*;
pub use checkout_gateway::*;
pub use error::*;
pub use order_lookup::*;
