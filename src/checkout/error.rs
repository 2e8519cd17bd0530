use crate::cart_actor::CartError;
use crate::clients::GatewayError;
use crate::model::ValidationErrors;
use thiserror::Error;

/// Reasons checkout could not start. None of them touch the cart.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Invalid customer details: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Cart is empty")]
    EmptyCart,

    #[error("Cart unavailable: {0}")]
    Cart(#[from] CartError),

    #[error("Payment session could not be created: {0}")]
    Gateway(#[from] GatewayError),
}

impl CheckoutError {
    /// Short text for a transient notification.
    pub fn user_message(&self) -> String {
        match self {
            CheckoutError::Validation(errors) => errors.to_string(),
            CheckoutError::EmptyCart => {
                "Your cart is empty. Browse our menu to add some items!".to_string()
            }
            CheckoutError::Cart(_) | CheckoutError::Gateway(_) => {
                "Something went wrong. Please try again.".to_string()
            }
        }
    }
}
