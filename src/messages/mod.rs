use tokio::sync::{oneshot, watch};
use rust_decimal::Decimal;
use crate::cart_actor::CartCommand;
use crate::domain::{CartState, Product, ProductId};
use crate::error::{CartError, CatalogError};

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Requests understood by the cart service. `Dispatch` and `AdjustQuantity`
/// mutate, everything else reads the committed state.
#[derive(Debug)]
pub enum CartRequest {
    Dispatch {
        command: CartCommand,
        respond_to: ServiceResponse<CartState, CartError>,
    },
    AdjustQuantity {
        id: ProductId,
        delta: i64,
        respond_to: ServiceResponse<CartState, CartError>,
    },
    Snapshot {
        respond_to: ServiceResponse<CartState, CartError>,
    },
    CartTotal {
        respond_to: ServiceResponse<Decimal, CartError>,
    },
    CartItemCount {
        respond_to: ServiceResponse<usize, CartError>,
    },
    IsFavourite {
        id: ProductId,
        respond_to: ServiceResponse<bool, CartError>,
    },
    Subscribe {
        respond_to: ServiceResponse<watch::Receiver<CartState>, CartError>,
    },
    Shutdown,
}

#[derive(Debug)]
pub enum CatalogRequest {
    ListProducts {
        respond_to: ServiceResponse<Vec<Product>, CatalogError>,
    },
    GetProduct {
        id: ProductId,
        respond_to: ServiceResponse<Product, CatalogError>,
    },
    Shutdown,
}
