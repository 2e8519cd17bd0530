//! Results of cart actions.
//!
//! The actions themselves are the reducer's [`CartAction`](crate::model::CartAction); each one
//! answers with the state it left behind.

use crate::model::{Applied, CartState};

/// What a cart action did, plus the resulting cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartOutcome {
    pub applied: Applied,
    pub state: CartState,
}

impl CartOutcome {
    pub fn changed(&self) -> bool {
        self.applied == Applied::Changed
    }
}
