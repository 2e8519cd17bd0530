//! Demo: fill a cart from the built-in menu, then optionally follow an order.
//!
//! ```bash
//! RUST_LOG=info cargo run -- [order-id]
//! ```

use cafe_storefront::lifecycle::{setup_tracing, StorefrontConfig, StorefrontSystem};
use cafe_storefront::model::{ItemId, OrderId};
use std::time::Duration;
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = StorefrontConfig::from_env().map_err(|e| e.to_string())?;
    let system = StorefrontSystem::new(config).map_err(|e| e.to_string())?;
    let catalog = system.catalog();

    let span = tracing::info_span!("cart");
    let session = async {
        let carts = &system.cart_client;
        let session = carts.open_session().await.map_err(|e| e.to_string())?;

        for item in catalog.popular().take(3) {
            info!(item = %item.name, price = %item.price, "Adding to cart");
            carts
                .add_item(session, item.clone())
                .await
                .map_err(|e| e.to_string())?;
        }

        let espresso = ItemId::from("hot-1");
        carts
            .update_quantity(session, espresso.clone(), 2)
            .await
            .map_err(|e| e.to_string())?;
        carts
            .set_note(session, espresso, Some("extra hot".to_string()))
            .await
            .map_err(|e| e.to_string())?;

        let cart = carts.snapshot(session).await.map_err(|e| e.to_string())?;
        for line in cart.lines() {
            info!(
                item = %line.item.name,
                quantity = line.quantity,
                line_total = %line.line_total(),
                note = line.note.as_deref().unwrap_or(""),
                "Cart line"
            );
        }
        info!(
            items = cart.item_count(),
            subtotal = %cart.subtotal(),
            tax = %cart.tax(),
            total = %cart.total(),
            "Cart totals"
        );
        Ok::<_, String>(session)
    }
    .instrument(span)
    .await?;

    if let Some(order_id) = std::env::args().nth(1) {
        let lookup = system.http_lookup().map_err(|e| e.to_string())?;
        let tracker = system.track_order(OrderId(order_id), lookup);
        let mut updates = tracker.subscribe();

        let wait = system.config().request_timeout() + Duration::from_secs(1);
        match tokio::time::timeout(wait, updates.changed()).await {
            Ok(Ok(())) => {
                let view = tracker.view();
                if let Some(progress) = &view.progress {
                    println!("Order #{}\n{}", view.order_id, progress.render_text());
                }
                if let Some(error) = &view.last_error {
                    warn!(%error, "Order status unavailable");
                }
            }
            _ => warn!("No order status received"),
        }
        tracker.stop().await.map_err(|e| e.to_string())?;
    }

    system
        .cart_client
        .close_session(session)
        .await
        .map_err(|e| e.to_string())?;
    system.shutdown().await.map_err(|e| e.to_string())?;

    info!("Demo completed successfully");
    Ok(())
}
