use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::product::{Product, ProductId};

/// One product in the cart together with how many units of it were added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    pub fn new(product: Product) -> Self {
        Self { product, quantity: 1 }
    }

    pub fn id(&self) -> ProductId {
        self.product.id
    }

    /// Price captured when the line was created, times its quantity.
    /// Saturates instead of overflowing.
    pub fn subtotal(&self) -> Decimal {
        self.product.price.saturating_mul(Decimal::from(self.quantity))
    }
}

/// Whole state of the cart store: cart lines and favourites, both in
/// insertion order and both unique by product id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartState {
    pub(crate) lines: Vec<CartLine>,
    pub(crate) favourites: Vec<Product>,
}

impl CartState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn favourites(&self) -> &[Product] {
        &self.favourites
    }

    pub fn line(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id() == id)
    }

    /// Sum of price times quantity over every line, capped at `Decimal::MAX`.
    pub fn cart_total(&self) -> Decimal {
        self.lines
            .iter()
            .map(CartLine::subtotal)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// Number of distinct products in the cart, shown as the badge count.
    pub fn cart_item_count(&self) -> usize {
        self.lines.len()
    }

    /// Number of units across all lines.
    pub fn unit_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    pub fn is_favourite(&self, id: ProductId) -> bool {
        self.favourites.iter().any(|product| product.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.favourites.is_empty()
    }
}
