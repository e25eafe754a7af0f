use tokio::sync::broadcast::error::RecvError;
use tracing::{error, info, warn, Instrument};

use storefront::app_system::seed::demo_catalog;
use storefront::app_system::{setup_tracing, StorefrontSystem};
use storefront::config::StorefrontConfig;
use storefront::domain::{BillingInfo, ShippingAddress};
use storefront::notify::{Notice, NoticeLevel};
use storefront::shell::StorefrontContext;

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = StorefrontConfig::from_env().map_err(|e| e.to_string())?;

    // Setup tracing once for the entire application
    setup_tracing(config.log_filter.as_deref());

    info!("Starting storefront");

    let system = StorefrontSystem::start(&config, &demo_catalog()).map_err(|e| e.to_string())?;

    // Toasts have no UI here; log them instead.
    let mut notices = system.notifier.subscribe();
    let toasts = tokio::spawn(async move {
        loop {
            match notices.recv().await {
                Ok(notice) => log_notice(&notice),
                Err(RecvError::Lagged(skipped)) => warn!(skipped, "Dropped notifications"),
                Err(RecvError::Closed) => break,
            }
        }
    });

    let context = &system.context;
    context
        .load_initial_data()
        .instrument(tracing::info_span!("mount"))
        .await;

    let search_term = std::env::args().nth(1).unwrap_or_default();
    let listed = context.handle_search(&search_term).await;
    info!(term = %search_term, hits = listed.len(), "Catalog");
    for product in &listed {
        info!(
            id = product.id,
            name = %product.name,
            category = %product.category,
            price = product.price,
            in_stock = product.in_stock,
            "Product"
        );
    }

    // Never place orders against a real store from the demo binary.
    if config.remote.is_none() {
        demo_checkout(context)
            .instrument(tracing::info_span!("checkout"))
            .await;
    }

    let orders = context.services().orders.get_all().await;
    info!(count = orders.len(), "Order history");
    for order in &orders {
        info!(
            id = order.id,
            date = ?order.order_date,
            status = %order.status,
            items = order.items.len(),
            total = ?order.total,
            "Order"
        );
    }

    // Shutdown system gracefully
    system.shutdown().await.map_err(|e| e.to_string())?;
    if let Err(e) = toasts.await {
        error!("Notification task failed: {:?}", e);
    }

    info!("Storefront finished");
    Ok(())
}

async fn demo_checkout(context: &StorefrontContext) {
    let cart = context.cart();
    for product in context.catalog().products().await.iter().take(2) {
        if let Err(e) = cart.add(product, 1).await {
            warn!(error = %e, product_id = product.id, "Could not add to cart");
        }
    }
    info!(
        items = context.cart_item_count().await,
        subtotal = context.cart_subtotal().await,
        "Cart ready"
    );

    let shipping = ShippingAddress {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        address: "12 Analytical Way".to_string(),
        city: "London".to_string(),
        state: "LDN".to_string(),
        zip_code: "N1 9GU".to_string(),
        country: "UK".to_string(),
    };
    let billing = BillingInfo {
        email: "ada@example.com".to_string(),
        phone: "+44 20 7946 0000".to_string(),
        address: shipping.address.clone(),
        city: shipping.city.clone(),
        state: shipping.state.clone(),
        zip_code: shipping.zip_code.clone(),
    };

    match context.checkout(shipping, billing).await {
        Ok(route) => info!(route = %route, "Checkout complete"),
        Err(e) => error!(error = %e, "Checkout failed"),
    }
}

fn log_notice(notice: &Notice) {
    match notice.level {
        NoticeLevel::Error => warn!(text = %notice.message, "Toast"),
        NoticeLevel::Success | NoticeLevel::Info => info!(text = %notice.message, "Toast"),
    }
}
