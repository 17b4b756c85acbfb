use std::collections::BTreeMap;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, instrument, warn};
use crate::cart_actor::CartCommand;
use crate::catalog::HttpCatalog;
use crate::clients::{CartClient, CatalogClient};
use crate::domain::{parse_catalog, CartState, Product, ProductId};
use crate::error::{CartError, CatalogError};
use crate::messages::{CartRequest, CatalogRequest, ServiceResponse};

// =============================================================================
// CART SERVICE
// =============================================================================

/// Single writer of the cart state.
///
/// Requests are drained one at a time, so a command is always applied to the
/// state left by the previous one. Every committed state is published on a
/// watch channel; subscribers only ever see whole states.
pub struct CartService {
    receiver: mpsc::Receiver<CartRequest>,
    state: CartState,
    publisher: watch::Sender<CartState>,
}

impl CartService {
    pub fn new(buffer_size: usize) -> (Self, CartClient) {
        Self::with_state(buffer_size, CartState::default())
    }

    /// Starts from a previously saved state instead of an empty cart.
    pub fn with_state(buffer_size: usize, state: CartState) -> (Self, CartClient) {
        let (sender, receiver) = mpsc::channel(buffer_size.max(1));
        let (publisher, _) = watch::channel(state.clone());
        let service = Self {
            receiver,
            state,
            publisher,
        };
        (service, CartClient::new(sender))
    }

    #[instrument(name = "cart_service", skip(self))]
    pub async fn run(mut self) {
        info!("CartService starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CartRequest::Dispatch { command, respond_to } => {
                    self.handle_dispatch(command, respond_to);
                }
                CartRequest::AdjustQuantity { id, delta, respond_to } => {
                    self.handle_adjust_quantity(id, delta, respond_to);
                }
                CartRequest::Snapshot { respond_to } => {
                    let _ = respond_to.send(Ok(self.state.clone()));
                }
                CartRequest::CartTotal { respond_to } => {
                    let _ = respond_to.send(Ok(self.state.cart_total()));
                }
                CartRequest::CartItemCount { respond_to } => {
                    let _ = respond_to.send(Ok(self.state.cart_item_count()));
                }
                CartRequest::IsFavourite { id, respond_to } => {
                    let _ = respond_to.send(Ok(self.state.is_favourite(id)));
                }
                CartRequest::Subscribe { respond_to } => {
                    let _ = respond_to.send(Ok(self.publisher.subscribe()));
                }
                CartRequest::Shutdown => {
                    info!("CartService shutting down");
                    break;
                }
            }
        }
        info!("CartService stopped");
    }

    #[instrument(fields(command = command.name(), product_id = ?command.product_id()), skip(self, command, respond_to))]
    fn handle_dispatch(&mut self, command: CartCommand, respond_to: ServiceResponse<CartState, CartError>) {
        debug!("Applying cart command");
        let next = std::mem::take(&mut self.state).apply(command);
        self.state = next;
        self.publisher.send_replace(self.state.clone());

        info!(
            lines = self.state.cart_item_count(),
            favourites = self.state.favourites().len(),
            total = %self.state.cart_total(),
            "Cart state committed"
        );
        let _ = respond_to.send(Ok(self.state.clone()));
    }

    /// Moves a line's quantity by `delta`, reading the quantity from the
    /// committed state in the same step so concurrent presses all count.
    #[instrument(fields(product_id = %id), skip(self, respond_to))]
    fn handle_adjust_quantity(&mut self, id: ProductId, delta: i64, respond_to: ServiceResponse<CartState, CartError>) {
        match self.state.line(id) {
            Some(line) => {
                let quantity = i64::from(line.quantity).saturating_add(delta);
                self.handle_dispatch(CartCommand::UpdateQuantity(id, quantity), respond_to);
            }
            None => {
                debug!("No line to adjust");
                let _ = respond_to.send(Ok(self.state.clone()));
            }
        }
    }
}

// =============================================================================
// CATALOG SERVICE
// =============================================================================

/// Read-only product catalog. Lookups never change its contents.
pub struct CatalogService {
    receiver: mpsc::Receiver<CatalogRequest>,
    products: BTreeMap<ProductId, Product>,
    remote: Option<HttpCatalog>,
}

impl CatalogService {
    pub fn new(buffer_size: usize, products: Vec<Product>) -> (Self, CatalogClient) {
        let (sender, receiver) = mpsc::channel(buffer_size.max(1));
        let service = Self {
            receiver,
            products: products.into_iter().map(|p| (p.id, p)).collect(),
            remote: None,
        };
        (service, CatalogClient::new(sender))
    }

    /// Catalog backed by a REST endpoint. `products` is the list fetched at
    /// startup; ids missing from it are looked up remotely and cached.
    pub fn with_remote(buffer_size: usize, products: Vec<Product>, remote: HttpCatalog) -> (Self, CatalogClient) {
        let (mut service, client) = Self::new(buffer_size, products);
        service.remote = Some(remote);
        (service, client)
    }

    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    /// Seeds the catalog from a JSON array of product records.
    pub fn from_json(buffer_size: usize, document: &str) -> Result<(Self, CatalogClient), CatalogError> {
        Ok(Self::new(buffer_size, parse_catalog(document)?))
    }

    #[instrument(name = "catalog_service", skip(self))]
    pub async fn run(mut self) {
        info!(product_count = self.products.len(), "CatalogService starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CatalogRequest::ListProducts { respond_to } => {
                    self.handle_list_products(respond_to);
                }
                CatalogRequest::GetProduct { id, respond_to } => {
                    self.handle_get_product(id, respond_to).await;
                }
                CatalogRequest::Shutdown => {
                    info!("CatalogService shutting down");
                    break;
                }
            }
        }
        info!("CatalogService stopped");
    }

    #[instrument(skip(self, respond_to))]
    fn handle_list_products(&self, respond_to: ServiceResponse<Vec<Product>, CatalogError>) {
        debug!("Processing list_products request");
        let products: Vec<Product> = self.products.values().cloned().collect();
        info!(product_count = products.len(), "Listed products");
        let _ = respond_to.send(Ok(products));
    }

    #[instrument(fields(product_id = %id), skip(self, respond_to))]
    async fn handle_get_product(&mut self, id: ProductId, respond_to: ServiceResponse<Product, CatalogError>) {
        debug!("Processing get_product request");
        let cached = self.products.get(&id).cloned();
        let result = match (cached, &self.remote) {
            (Some(product), _) => {
                info!(title = %product.title, "Product found");
                Ok(product)
            }
            (None, Some(remote)) => {
                let fetched = remote.fetch_product(id).await;
                if let Ok(product) = &fetched {
                    info!(title = %product.title, "Product fetched remotely");
                    self.products.insert(id, product.clone());
                }
                fetched
            }
            (None, None) => {
                warn!("Product not found");
                Err(CatalogError::NotFound(id.to_string()))
            }
        };
        let _ = respond_to.send(result);
    }
}
