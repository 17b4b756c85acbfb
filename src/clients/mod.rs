#[macro_use]
mod macros;

mod cart_client;
mod catalog_client;
mod checkout_client;

pub use cart_client::*;
pub use catalog_client::*;
pub use checkout_client::*;
