//! REST product catalog in the public demo store API's shape:
//! `GET {base}/products` and `GET {base}/products/{id}`.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::{debug, info, instrument, warn};

use crate::domain::{parse_catalog, Product, ProductId};
use crate::error::CatalogError;

/// HTTP client for the remote catalog. Every request is bounded by the
/// timeout given at construction.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    base_url: String,
    http: Client,
}

impl HttpCatalog {
    /// # Errors
    ///
    /// `CatalogError::Unavailable` when the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, CatalogError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::Unavailable(e.to_string()))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches the whole product list.
    ///
    /// # Errors
    ///
    /// `Unavailable` on transport failures, timeouts and non-success statuses,
    /// `InvalidCatalog` when the body is not a valid product list.
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        let url = format!("{}/products", self.base_url);
        let (status, body) = self.get(&url).await?;
        if !status.is_success() {
            return Err(unexpected_status(status, &body));
        }

        let products = parse_catalog(&body)?;
        info!(product_count = products.len(), "Catalog fetched");
        Ok(products)
    }

    /// Fetches one product by id.
    ///
    /// # Errors
    ///
    /// `NotFound` for a 404 or an empty body (the demo API answers unknown ids
    /// with an empty 200), otherwise as [`fetch_products`](Self::fetch_products).
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn fetch_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        let url = format!("{}/products/{}", self.base_url, id);
        let (status, body) = self.get(&url).await?;
        if status == StatusCode::NOT_FOUND || (status.is_success() && body.trim().is_empty()) {
            warn!("Product not found remotely");
            return Err(CatalogError::NotFound(id.to_string()));
        }
        if !status.is_success() {
            return Err(unexpected_status(status, &body));
        }

        let product: Product =
            serde_json::from_str(&body).map_err(|e| CatalogError::InvalidCatalog(e.to_string()))?;
        if product.price.is_sign_negative() {
            return Err(CatalogError::InvalidCatalog(format!("negative price for product {}", product.id)));
        }
        Ok(product)
    }

    async fn get(&self, url: &str) -> Result<(StatusCode, String), CatalogError> {
        debug!(url, "Sending catalog request");
        let response = self.http.get(url).send().await.map_err(transport_error)?;
        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;
        Ok((status, body))
    }
}

fn transport_error(e: reqwest::Error) -> CatalogError {
    if e.is_timeout() {
        CatalogError::Unavailable(format!("catalog request timed out: {e}"))
    } else {
        CatalogError::Unavailable(e.to_string())
    }
}

fn unexpected_status(status: StatusCode, body: &str) -> CatalogError {
    CatalogError::Unavailable(format!("catalog request failed with status {status}: {body}"))
}
