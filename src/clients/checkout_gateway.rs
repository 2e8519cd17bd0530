//! # Checkout Gateway
//!
//! Creates a hosted payment session for the current cart. The session id is opaque: the
//! caller only uses it to redirect the customer into the external payment flow.

use crate::clients::error::GatewayError;
use crate::model::{CartLine, CustomerInfo};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Opaque handle of an externally hosted payment session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CheckoutSessionId(pub String);

impl Display for CheckoutSessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSession {
    pub session_id: CheckoutSessionId,
}

/// Anything that can open a payment session for a list of cart lines.
#[async_trait]
pub trait CheckoutGateway: Send + Sync {
    async fn create_session(
        &self,
        lines: &[CartLine],
        customer: &CustomerInfo,
    ) -> Result<CheckoutSession, GatewayError>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckoutRequest<'a> {
    items: &'a [CartLine],
    customer_info: &'a CustomerInfo,
}

/// Gateway backed by the storefront API's `POST /api/create-checkout-session`.
#[derive(Debug, Clone)]
pub struct HttpCheckoutGateway {
    http: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpCheckoutGateway {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint: format!(
                "{}/api/create-checkout-session",
                base_url.trim_end_matches('/')
            ),
            timeout,
        })
    }
}

#[async_trait]
impl CheckoutGateway for HttpCheckoutGateway {
    #[instrument(skip(self, lines, customer), fields(lines = lines.len()))]
    async fn create_session(
        &self,
        lines: &[CartLine],
        customer: &CustomerInfo,
    ) -> Result<CheckoutSession, GatewayError> {
        debug!(endpoint = %self.endpoint, "Creating checkout session");
        let response = self
            .http
            .post(&self.endpoint)
            .json(&CheckoutRequest {
                items: lines,
                customer_info: customer,
            })
            .send()
            .await
            .map_err(|e| timeout_or_http(e, self.timeout))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), %message, "Checkout session refused");
            return Err(GatewayError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let session: CheckoutSession = response.json().await?;
        debug!(session_id = %session.session_id, "Checkout session created");
        Ok(session)
    }
}

/// Client-level timeouts are reported with the configured duration.
pub(crate) fn timeout_or_http(error: reqwest::Error, timeout: Duration) -> GatewayError {
    if error.is_timeout() {
        GatewayError::Timeout(timeout)
    } else {
        GatewayError::Http(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Applied, CartAction, CartState, MenuCategory, MenuItem};

    #[test]
    fn test_request_body_matches_api() {
        let mut cart = CartState::new();
        let latte = MenuItem::new("hot-3", "Artisan Café Latte", 4.79, MenuCategory::HotCoffee);
        assert_eq!(cart.apply(CartAction::Add(latte), 0.08), Applied::Changed);
        let customer = CustomerInfo::new("Ada", "ada@example.com", "+14155550100");

        let body = serde_json::to_value(CheckoutRequest {
            items: cart.lines(),
            customer_info: &customer,
        })
        .unwrap();

        assert_eq!(body["items"][0]["id"], "hot-3");
        assert_eq!(body["items"][0]["quantity"], 1);
        assert_eq!(body["customerInfo"]["email"], "ada@example.com");
    }

    #[test]
    fn test_session_response_parses() {
        let session: CheckoutSession =
            serde_json::from_str(r#"{"sessionId":"cs_test_123"}"#).unwrap();
        assert_eq!(session.session_id, CheckoutSessionId("cs_test_123".into()));
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let gateway =
            HttpCheckoutGateway::new("http://localhost:3000/", Duration::from_secs(10)).unwrap();
        assert_eq!(
            gateway.endpoint,
            "http://localhost:3000/api/create-checkout-session"
        );
    }
}
