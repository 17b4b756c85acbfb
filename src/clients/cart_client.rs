use rust_decimal::Decimal;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, instrument};
use crate::cart_actor::CartCommand;
use crate::domain::{CartState, Product, ProductId};
use crate::error::CartError;
use crate::messages::CartRequest;

/// Handle to the cart service.
///
/// Screens hold a clone of this and never touch [`CartState`] directly: they
/// dispatch commands and render the snapshots they get back.
#[derive(Clone, Debug)]
pub struct CartClient {
    sender: mpsc::Sender<CartRequest>,
}

impl CartClient {
    pub fn new(sender: mpsc::Sender<CartRequest>) -> Self {
        Self { sender }
    }

    /// Sends one command and returns the state it produced.
    #[instrument(fields(command = command.name()), skip(self, command))]
    pub async fn dispatch(&self, command: CartCommand) -> Result<CartState, CartError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(CartRequest::Dispatch { command, respond_to })
            .await
            .map_err(|_| CartError::ActorCommunicationError("Actor closed".to_string()))?;
        response
            .await
            .map_err(|_| CartError::ActorCommunicationError("Actor dropped".to_string()))?
    }

    /// The "+" button: one more unit of an existing line.
    pub async fn increment_quantity(&self, id: ProductId) -> Result<CartState, CartError> {
        self.adjust_quantity(id, 1).await
    }

    /// The "-" button: one unit less, never below one.
    pub async fn decrement_quantity(&self, id: ProductId) -> Result<CartState, CartError> {
        self.adjust_quantity(id, -1).await
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), CartError> {
        debug!("Sending shutdown request");
        self.sender
            .send(CartRequest::Shutdown)
            .await
            .map_err(|_| CartError::ActorCommunicationError("Actor closed".to_string()))
    }
}

cart_command!(CartClient => fn add_to_cart(product: Product));
cart_command!(CartClient => fn remove_from_cart(id: ProductId));
cart_command!(CartClient => fn update_quantity(id: ProductId, quantity: i64));
cart_command!(CartClient => fn clear_cart());
cart_command!(CartClient => fn add_to_favourites(product: Product));
cart_command!(CartClient => fn remove_from_favourites(id: ProductId));

client_method!(CartClient => fn adjust_quantity(id: ProductId, delta: i64) -> CartState as CartRequest::AdjustQuantity, Error = CartError);
client_method!(CartClient => fn snapshot() -> CartState as CartRequest::Snapshot, Error = CartError);
client_method!(CartClient => fn cart_total() -> Decimal as CartRequest::CartTotal, Error = CartError);
client_method!(CartClient => fn cart_item_count() -> usize as CartRequest::CartItemCount, Error = CartError);
client_method!(CartClient => fn is_favourite(id: ProductId) -> bool as CartRequest::IsFavourite, Error = CartError);
client_method!(CartClient => fn subscribe() -> watch::Receiver<CartState> as CartRequest::Subscribe, Error = CartError);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actors::CartService;

    fn product(id: u64) -> Product {
        Product::new(id, "Jacket", Decimal::new(5599, 2))
    }

    #[tokio::test]
    async fn test_increment_and_decrement_buttons() -> Result<(), CartError> {
        let (service, client) = CartService::new(10);
        tokio::spawn(service.run());

        client.add_to_cart(product(1)).await?;
        client.increment_quantity(ProductId(1)).await?;
        let state = client.increment_quantity(ProductId(1)).await?;
        assert_eq!(state.line(ProductId(1)).map(|l| l.quantity), Some(3));

        for _ in 0..5 {
            client.decrement_quantity(ProductId(1)).await?;
        }
        let state = client.snapshot().await?;
        assert_eq!(state.line(ProductId(1)).map(|l| l.quantity), Some(1));
        Ok(())
    }

    #[tokio::test]
    async fn test_buttons_on_missing_line_do_nothing() -> Result<(), CartError> {
        let (service, client) = CartService::new(10);
        tokio::spawn(service.run());

        let state = client.increment_quantity(ProductId(42)).await?;
        assert_eq!(state, CartState::default());
        Ok(())
    }

    #[tokio::test]
    async fn test_favourite_toggle() -> Result<(), CartError> {
        let (service, client) = CartService::new(10);
        tokio::spawn(service.run());

        client.add_to_favourites(product(3)).await?;
        client.add_to_favourites(product(3)).await?;
        assert!(client.is_favourite(ProductId(3)).await?);
        assert_eq!(client.snapshot().await?.favourites().len(), 1);

        client.remove_from_favourites(ProductId(3)).await?;
        assert!(!client.is_favourite(ProductId(3)).await?);
        Ok(())
    }
}
