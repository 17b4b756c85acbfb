//! # Storefront cart store
//!
//! The state behind a shopping app's cart, favourites and checkout, built
//! as small actor-style services.
//!
//! ## Pieces
//!
//! - **Domain types** - Products, cart lines and the cart state → [`Product`], [`CartLine`], [`CartState`]
//! - **Commands** - The closed set of cart transitions and the pure reducer → [`CartCommand`], [`CartState::apply`]
//! - **Services** - Tasks that own state and drain a request channel → [`CartService`], [`CatalogService`]
//! - **Remote catalog** - REST product source with a request timeout → [`HttpCatalog`]
//! - **Clients** - Cloneable handles with traced, macro-generated methods → [`CartClient`], [`CatalogClient`]
//! - **Orchestration** - Checkout reads the total, simulates a payment, clears the cart → [`CheckoutClient`]
//! - **Device storage** - Key-value records for the demo session and profile picture → [`KeyValueStore`], [`SessionManager`]
//! - **System** - Startup, wiring and shutdown → [`StoreSystem`], [`setup_tracing`]
//!
//! ## Example Usage
//!
//! ```no_run
//! # use storefront_cart::*;
//! # use rust_decimal::Decimal;
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let system = StoreSystem::new(StoreConfig::default(), vec![
//!     Product::new(1u64, "Backpack", Decimal::new(10995, 2)),
//! ]);
//!
//! let product = system.catalog_client.get_product(ProductId(1)).await?;
//! system.cart_client.add_to_cart(product).await?;
//! let outcome = system.checkout_client.pay(PaymentMethod::CashOnDelivery).await?;
//!
//! system.shutdown().await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Expected Tracing Output
//!
//! ```text
//! INFO store_system: Starting store system product_count=1
//! INFO cart_service: CartService starting
//! INFO catalog_service: CatalogService starting product_count=1
//! INFO cart_service:handle_dispatch{command="add_to_cart" product_id=Some(ProductId(1))}: Cart state committed lines=1 favourites=0 total=109.95
//! INFO pay{method=cod}: Payment completed, cart cleared txn_id="cod_1760000000000"
//! ```

pub mod actors;
pub mod app_system;
pub mod cart_actor;
pub mod catalog;
pub mod checkout;
pub mod clients;
pub mod config;
pub mod domain;
pub mod error;
pub mod messages;
pub mod session;
pub mod storage;

#[cfg(test)]
mod mock_framework;
#[cfg(test)]
mod integration_tests;

pub use actors::{CartService, CatalogService};
pub use app_system::{setup_tracing, StoreSystem};
pub use cart_actor::CartCommand;
pub use catalog::HttpCatalog;
pub use checkout::{CardDetails, PaymentKind, PaymentMethod, PaymentOutcome, PaymentReceipt};
pub use clients::{CartClient, CatalogClient, CheckoutClient};
pub use config::StoreConfig;
pub use domain::{parse_catalog, CartLine, CartState, Product, ProductId};
pub use error::{CartError, CatalogError, CheckoutError, SessionError, StorageError};
pub use session::{SessionManager, SessionUser};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore};
