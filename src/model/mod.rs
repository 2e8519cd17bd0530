//! Pure data structures: the menu catalog, cart state and its reducer, order status, and
//! customer details.

pub mod cart;
pub mod customer;
pub mod menu;
pub mod money;
pub mod order;

pub use cart::*;
pub use customer::*;
pub use menu::*;
pub use money::*;
pub use order::*;
