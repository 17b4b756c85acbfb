use thiserror::Error;

/// Errors a cart client can observe. The cart itself never fails; only the
/// channel to its service can.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error("Product not found: {0}")]
    NotFound(String),
    #[error("Invalid catalog document: {0}")]
    InvalidCatalog(String),
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Storage serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Invalid email: {0:?}")]
    InvalidEmail(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CheckoutError {
    #[error("Cart is empty")]
    EmptyCart,
    #[error("Invalid card details: {0}")]
    InvalidCard(String),
    #[error("Cart unavailable: {0}")]
    Cart(#[from] CartError),
}
