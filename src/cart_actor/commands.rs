use crate::domain::{Product, ProductId};

/// Commands accepted by the cart store.
///
/// Every command is total: unknown ids are no-ops, never errors.
#[derive(Debug, Clone, PartialEq)]
pub enum CartCommand {
    /// Adds one unit of a product, creating its line on first add.
    AddToCart(Product),
    /// Removes a product's line entirely.
    RemoveFromCart(ProductId),
    /// Sets the quantity of an existing line.
    ///
    /// # Arguments
    /// * `ProductId` - The line to change
    /// * `i64` - Requested quantity; anything below 1 is clamped to 1
    UpdateQuantity(ProductId, i64),
    /// Resets the whole state, favourites included.
    ClearCart,
    /// Marks a product as favourite, once.
    AddToFavourites(Product),
    /// Drops a product from the favourites.
    RemoveFromFavourites(ProductId),
}

impl CartCommand {
    /// Short name used as a tracing field.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddToCart(_) => "add_to_cart",
            Self::RemoveFromCart(_) => "remove_from_cart",
            Self::UpdateQuantity(..) => "update_quantity",
            Self::ClearCart => "clear_cart",
            Self::AddToFavourites(_) => "add_to_favourites",
            Self::RemoveFromFavourites(_) => "remove_from_favourites",
        }
    }

    /// Product the command touches, if any.
    pub fn product_id(&self) -> Option<ProductId> {
        match self {
            Self::AddToCart(product) | Self::AddToFavourites(product) => Some(product.id),
            Self::RemoveFromCart(id) | Self::UpdateQuantity(id, _) | Self::RemoveFromFavourites(id) => Some(*id),
            Self::ClearCart => None,
        }
    }
}
