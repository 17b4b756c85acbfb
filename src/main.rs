use tracing::{error, info, warn, Instrument};
use storefront_cart::{
    parse_catalog, setup_tracing, MemoryStore, PaymentOutcome, PaymentMethod, ProductId, SessionManager,
    StoreConfig, StoreSystem,
};

const CATALOG: &str = include_str!("../data/catalog.json");

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    info!("Starting storefront");

    let mut session = SessionManager::new(MemoryStore::new());
    if session.load().map_err(|e| e.to_string())?.is_none() {
        session.login("alice@example.com").map_err(|e| e.to_string())?;
    }

    let config = StoreConfig::load().map_err(|e| e.to_string())?;
    let bundled = parse_catalog(CATALOG).map_err(|e| e.to_string())?;
    let system = match StoreSystem::connect(config.clone(), bundled.clone()).await {
        Ok(system) => system,
        Err(e) => {
            warn!(error = %e, "Remote catalog unavailable, using bundled catalog");
            StoreSystem::new(config, bundled)
        }
    };

    let span = tracing::info_span!("browsing");
    async {
        let products = system.catalog_client.list_products().await.map_err(|e| e.to_string())?;
        info!(product_count = products.len(), "Catalog loaded");

        let backpack = system.catalog_client.get_product(ProductId(1)).await.map_err(|e| e.to_string())?;
        let shirt = system.catalog_client.get_product(ProductId(2)).await.map_err(|e| e.to_string())?;
        let bracelet = system.catalog_client.get_product(ProductId(5)).await.map_err(|e| e.to_string())?;

        let cart = &system.cart_client;
        cart.add_to_cart(backpack.clone()).await.map_err(|e| e.to_string())?;
        cart.add_to_cart(shirt).await.map_err(|e| e.to_string())?;
        cart.add_to_cart(backpack).await.map_err(|e| e.to_string())?;
        cart.decrement_quantity(ProductId(1)).await.map_err(|e| e.to_string())?;
        cart.add_to_favourites(bracelet).await.map_err(|e| e.to_string())?;

        let badge = cart.cart_item_count().await.map_err(|e| e.to_string())?;
        let total = cart.cart_total().await.map_err(|e| e.to_string())?;
        info!(badge, total = %total, "Cart ready for checkout");
        Ok::<_, String>(())
    }
    .instrument(span)
    .await?;

    let span = tracing::info_span!("checkout");
    let outcome = system
        .checkout_client
        .pay(PaymentMethod::CashOnDelivery)
        .instrument(span)
        .await;

    match outcome {
        Ok(PaymentOutcome::Completed(receipt)) => {
            info!(txn_id = %receipt.txn_id, amount = %receipt.amount, "Order placed")
        }
        Ok(PaymentOutcome::Redirect { pay_url, .. }) => info!(pay_url = %pay_url, "Continue in payment app"),
        Err(e) => {
            error!(error = %e, "Checkout failed")
        }
    }

    system.shutdown().await?;

    info!("Storefront finished");
    Ok(())
}
