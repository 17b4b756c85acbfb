use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Stable catalog identifier of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A product record as served by the catalog.
///
/// The cart never mutates a product; it keeps the snapshot it was handed,
/// so prices in the cart are the prices at the time of adding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Decimal,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
}

impl Product {
    /// Creates a product with only the fields the cart cares about.
    ///
    /// The price is taken as given; catalog documents are checked for
    /// negative prices by [`parse_catalog`].
    ///
    /// # Arguments
    /// * `id` - Catalog identifier
    /// * `title` - Display title
    /// * `price` - Unit price
    pub fn new(id: impl Into<ProductId>, title: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            price,
            image: String::new(),
            category: String::new(),
            description: String::new(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Parses a JSON array of product records, rejecting negative prices.
pub fn parse_catalog(document: &str) -> Result<Vec<Product>, CatalogError> {
    let products: Vec<Product> =
        serde_json::from_str(document).map_err(|e| CatalogError::InvalidCatalog(e.to_string()))?;
    if let Some(product) = products.iter().find(|p| p.price.is_sign_negative()) {
        return Err(CatalogError::InvalidCatalog(format!("negative price for product {}", product.id)));
    }
    Ok(products)
}
