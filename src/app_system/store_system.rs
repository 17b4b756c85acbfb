use tracing::{error, info};
use crate::actors::{CartService, CatalogService};
use crate::catalog::HttpCatalog;
use crate::clients::{CartClient, CatalogClient, CheckoutClient};
use crate::config::StoreConfig;
use crate::domain::{CartState, Product};
use crate::error::CatalogError;

/// Starts the cart and catalog services and hands out their clients.
///
/// Screens get the clients from here; nothing looks the store up globally.
pub struct StoreSystem {
    pub cart_client: CartClient,
    pub catalog_client: CatalogClient,
    pub checkout_client: CheckoutClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl StoreSystem {
    pub fn new(config: StoreConfig, products: Vec<Product>) -> Self {
        Self::with_cart_state(config, products, CartState::default())
    }

    /// Same as [`new`](Self::new) but the cart starts from `cart_state`.
    pub fn with_cart_state(config: StoreConfig, products: Vec<Product>, cart_state: CartState) -> Self {
        let catalog = CatalogService::new(config.channel_buffer.get(), products);
        Self::start(config, catalog, cart_state)
    }

    /// Starts against the REST catalog at `config.catalog_url`, or against
    /// `bundled` when no URL is configured.
    ///
    /// # Errors
    ///
    /// Fails when the remote product list cannot be fetched.
    pub async fn connect(config: StoreConfig, bundled: Vec<Product>) -> Result<Self, CatalogError> {
        let Some(url) = config.catalog_url.clone() else {
            return Ok(Self::new(config, bundled));
        };

        let remote = HttpCatalog::new(url, config.catalog_timeout)?;
        let products = remote.fetch_products().await?;
        info!(base_url = remote.base_url(), "Using remote catalog");
        let catalog = CatalogService::with_remote(config.channel_buffer.get(), products, remote);
        Ok(Self::start(config, catalog, CartState::default()))
    }

    fn start(config: StoreConfig, catalog: (CatalogService, CatalogClient), cart_state: CartState) -> Self {
        let (catalog_service, catalog_client) = catalog;
        info!(product_count = catalog_service.product_count(), "Starting store system");

        let (cart_service, cart_client) = CartService::with_state(config.channel_buffer.get(), cart_state);
        let cart_handle = tokio::spawn(cart_service.run());
        let catalog_handle = tokio::spawn(catalog_service.run());

        let checkout_client = CheckoutClient::new(cart_client.clone(), config);

        Self {
            cart_client,
            catalog_client,
            checkout_client,
            handles: vec![cart_handle, catalog_handle],
        }
    }

    /// Stops every service and waits for them, even if one of them is
    /// already gone. Reports the first failure.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");
        let mut first_error: Option<String> = None;

        // The checkout client holds a cart client too, so ask explicitly
        // instead of waiting for every sender to drop.
        if let Err(e) = self.cart_client.shutdown().await {
            error!(error = %e, "Cart service shutdown request failed");
            first_error.get_or_insert(e.to_string());
        }
        if let Err(e) = self.catalog_client.shutdown().await {
            error!(error = %e, "Catalog service shutdown request failed");
            first_error.get_or_insert(e.to_string());
        }

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                first_error.get_or_insert(format!("Actor task failed: {:?}", e));
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => {
                info!("System shutdown complete.");
                Ok(())
            }
        }
    }
}
