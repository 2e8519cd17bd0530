//! Hands the cart to the payment provider and clears it once payment is confirmed.

use super::CheckoutError;
use crate::cart_actor::SessionId;
use crate::clients::{CartClient, CheckoutGateway, CheckoutSession};
use crate::model::CustomerInfo;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};

/// Where to send the customer next, and after how long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub to: String,
    pub after: Duration,
}

#[derive(Clone)]
pub struct CheckoutFlow {
    carts: CartClient,
    gateway: Arc<dyn CheckoutGateway>,
    redirect_delay: Duration,
}

impl CheckoutFlow {
    pub fn new(carts: CartClient, gateway: Arc<dyn CheckoutGateway>, redirect_delay: Duration) -> Self {
        Self {
            carts,
            gateway,
            redirect_delay,
        }
    }

    /// Validates the customer and opens a payment session for the session's cart.
    ///
    /// The cart is only read. On any error it is exactly as it was before the call.
    #[instrument(skip(self, customer))]
    pub async fn begin(
        &self,
        session: SessionId,
        customer: &CustomerInfo,
    ) -> Result<CheckoutSession, CheckoutError> {
        if let Err(errors) = customer.validate() {
            warn!(%errors, "Customer details rejected");
            return Err(errors.into());
        }

        let cart = self.carts.snapshot(session).await?;
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let checkout = self
            .gateway
            .create_session(cart.lines(), customer)
            .await
            .inspect_err(|e| warn!(error = %e, "Checkout session failed"))?;

        info!(
            checkout_session = %checkout.session_id,
            items = cart.item_count(),
            total = %cart.total(),
            "Checkout started"
        );
        Ok(checkout)
    }

    /// Payment succeeded: empty the cart and send the customer home.
    #[instrument(skip(self))]
    pub async fn confirm(&self, session: SessionId) -> Result<Redirect, CheckoutError> {
        self.carts.clear(session).await?;
        info!("Order confirmed, cart cleared");
        Ok(Redirect {
            to: "/".to_string(),
            after: self.redirect_delay,
        })
    }
}
