use crate::cart_actor::{self, CartContext};
use crate::checkout::CheckoutFlow;
use crate::clients::{
    CartClient, CheckoutGateway, GatewayError, HttpCheckoutGateway, HttpOrderLookup, OrderLookup,
};
use crate::lifecycle::{ConfigError, StorefrontConfig};
use crate::model::{Catalog, CatalogError, OrderId};
use crate::tracker::{OrderTracker, TrackerSettings};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Menu could not be loaded: {0}")]
    Catalog(#[from] CatalogError),

    #[error("HTTP client could not be built: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Actor task failed: {0}")]
    ActorFailed(String),
}

/// The running storefront: the cart actor, the menu, and factories for the checkout flow
/// and order trackers.
///
/// `StorefrontSystem` is responsible for:
/// - **Lifecycle Management**: Starting the cart actor and stopping it on shutdown
/// - **Context Injection**: Handing the configured tax rate to the cart actor
/// - **Wiring**: Building checkout flows and trackers from the configuration
///
/// # Example
///
/// ```ignore
/// let system = StorefrontSystem::new(StorefrontConfig::from_env()?)?;
///
/// let session = system.cart_client.open_session().await?;
/// let espresso = system.catalog().get(&"hot-1".into()).cloned().unwrap();
/// system.cart_client.add_item(session, espresso).await?;
///
/// system.shutdown().await?;
/// ```
pub struct StorefrontSystem {
    /// Client for interacting with the Cart actor
    pub cart_client: CartClient,

    catalog: Arc<Catalog>,
    config: StorefrontConfig,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl StorefrontSystem {
    /// Loads the built-in menu and spawns the cart actor.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(config: StorefrontConfig) -> Result<Self, LifecycleError> {
        Self::with_catalog(config, Catalog::builtin()?)
    }

    pub fn with_catalog(config: StorefrontConfig, catalog: Catalog) -> Result<Self, LifecycleError> {
        config.validate()?;

        let (cart_actor, cart_client) = cart_actor::new(config.channel_buffer);
        let cart_handle = tokio::spawn(cart_actor.run(CartContext {
            tax_rate: config.tax_rate,
        }));

        info!(
            items = catalog.len(),
            tax_rate = config.tax_rate,
            "Storefront started"
        );
        Ok(Self {
            cart_client: CartClient::new(cart_client),
            catalog: Arc::new(catalog),
            config,
            handles: vec![cart_handle],
        })
    }

    pub fn catalog(&self) -> Arc<Catalog> {
        self.catalog.clone()
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// Checkout flow over this system's carts and the given payment gateway.
    pub fn checkout(&self, gateway: Arc<dyn CheckoutGateway>) -> CheckoutFlow {
        CheckoutFlow::new(self.cart_client.clone(), gateway, self.config.redirect_delay())
    }

    /// Checkout flow talking to the configured storefront API.
    pub fn http_checkout(&self) -> Result<CheckoutFlow, LifecycleError> {
        let gateway =
            HttpCheckoutGateway::new(&self.config.api_base_url, self.config.request_timeout())?;
        Ok(self.checkout(Arc::new(gateway)))
    }

    /// Starts polling `order_id` with the configured schedule.
    pub fn track_order(&self, order_id: OrderId, lookup: Arc<dyn OrderLookup>) -> OrderTracker {
        OrderTracker::start(order_id, lookup, TrackerSettings::from(&self.config))
    }

    /// Order lookup against the configured storefront API.
    pub fn http_lookup(&self) -> Result<Arc<dyn OrderLookup>, LifecycleError> {
        let lookup = HttpOrderLookup::new(&self.config.api_base_url, self.config.request_timeout())?;
        Ok(Arc::new(lookup))
    }

    /// Stops the cart actor and waits for it to exit.
    ///
    /// The actor exits once every [`CartClient`] is gone, so clients handed out earlier
    /// (including those inside a [`CheckoutFlow`]) must be dropped first.
    pub async fn shutdown(self) -> Result<(), LifecycleError> {
        info!("Shutting down storefront...");

        // Dropping the last sender closes the request channel and ends the run loop.
        drop(self.cart_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(LifecycleError::ActorFailed(e.to_string()));
            }
        }

        info!("Storefront shutdown complete.");
        Ok(())
    }
}
