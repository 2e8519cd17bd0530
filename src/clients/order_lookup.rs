//! # Order Lookup
//!
//! Read-only view of an order's fulfilment status, polled by the order tracker.

use crate::clients::checkout_gateway::timeout_or_http;
use crate::clients::error::GatewayError;
use crate::model::{OrderId, OrderTrackingInfo};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, instrument};

#[async_trait]
pub trait OrderLookup: Send + Sync + 'static {
    async fn fetch(&self, order_id: &OrderId) -> Result<OrderTrackingInfo, GatewayError>;
}

/// Lookup backed by the storefront API's `GET /api/orders/{id}`.
#[derive(Debug, Clone)]
pub struct HttpOrderLookup {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpOrderLookup {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    fn url(&self, order_id: &OrderId) -> String {
        format!("{}/api/orders/{}", self.base_url, order_id)
    }
}

#[async_trait]
impl OrderLookup for HttpOrderLookup {
    #[instrument(skip(self, order_id), fields(order_id = %order_id))]
    async fn fetch(&self, order_id: &OrderId) -> Result<OrderTrackingInfo, GatewayError> {
        let response = self
            .http
            .get(self.url(order_id))
            .send()
            .await
            .map_err(|e| timeout_or_http(e, self.timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Status {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let info: OrderTrackingInfo = response.json().await?;
        debug!(status = %info.status, "Fetched order status");
        Ok(info)
    }
}
