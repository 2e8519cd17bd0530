//! [`ActorEntity`] implementation for a customer's cart.
//!
//! One `Cart` exists per customer session. The cart actor owns every open cart and
//! applies actions to them one at a time.

use super::{CartError, CartOutcome};
use crate::framework::ActorEntity;
use crate::model::{Applied, CartAction, CartState};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use tracing::debug;

/// Type-safe identifier for customer sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub u32);

impl From<u32> for SessionId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "session_{}", self.0)
    }
}

/// Payload for opening a new, empty cart.
#[derive(Debug, Clone, Copy, Default)]
pub struct CartCreate;

/// Runtime context shared by every cart: pricing configuration.
#[derive(Debug, Clone, Copy)]
pub struct CartContext {
    pub tax_rate: f64,
}

/// A customer session's cart.
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    pub session: SessionId,
    pub state: CartState,
    /// Bumped by every action that changes `state`; starts at 0.
    pub revision: u64,
}

#[async_trait]
impl ActorEntity for Cart {
    type Id = SessionId;
    type Create = CartCreate;
    type Action = CartAction;
    type ActionResult = CartOutcome;
    type Context = CartContext;
    type Error = CartError;

    fn from_create_params(id: SessionId, _params: CartCreate) -> Result<Self, CartError> {
        Ok(Self {
            session: id,
            state: CartState::new(),
            revision: 0,
        })
    }

    async fn handle_action(
        &mut self,
        action: CartAction,
        ctx: &CartContext,
    ) -> Result<CartOutcome, CartError> {
        let applied = self.state.apply(action, ctx.tax_rate);
        if applied == Applied::Changed {
            self.revision += 1;
        }
        debug!(
            session = %self.session,
            ?applied,
            revision = self.revision,
            lines = self.state.lines().len(),
            subtotal = %self.state.subtotal(),
            "Cart reduced"
        );
        Ok(CartOutcome {
            applied,
            state: self.state.clone(),
        })
    }
}
