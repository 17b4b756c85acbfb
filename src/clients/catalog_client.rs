use tokio::sync::mpsc;
use tracing::{debug, instrument};
use crate::domain::{Product, ProductId};
use crate::error::CatalogError;
use crate::messages::CatalogRequest;

/// Client for the read-only product catalog.
#[derive(Clone, Debug)]
pub struct CatalogClient {
    sender: mpsc::Sender<CatalogRequest>,
}

impl CatalogClient {
    pub fn new(sender: mpsc::Sender<CatalogRequest>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), CatalogError> {
        debug!("Sending shutdown request");
        self.sender
            .send(CatalogRequest::Shutdown)
            .await
            .map_err(|_| CatalogError::ActorCommunicationError("Actor closed".to_string()))
    }
}

client_method!(CatalogClient => fn list_products() -> Vec<Product> as CatalogRequest::ListProducts, Error = CatalogError);
client_method!(CatalogClient => fn get_product(id: ProductId) -> Product as CatalogRequest::GetProduct, Error = CatalogError);
