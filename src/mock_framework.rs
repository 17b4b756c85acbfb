//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_cart_client`] to get a client and the receiver its
//! requests land on, then answer them with [`expect_cart_total`] and
//! [`expect_dispatch`].

use rust_decimal::Decimal;
use tokio::sync::mpsc;
use crate::cart_actor::CartCommand;
use crate::clients::CartClient;
use crate::domain::CartState;
use crate::error::CartError;
use crate::messages::{CartRequest, ServiceResponse};

/// Creates a cart client whose requests go to a receiver the test controls
/// instead of a running `CartService`.
pub fn create_mock_cart_client(buffer_size: usize) -> (CartClient, mpsc::Receiver<CartRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (CartClient::new(sender), receiver)
}

/// Helper to verify that the next message is a CartTotal request
pub async fn expect_cart_total(
    receiver: &mut mpsc::Receiver<CartRequest>,
) -> Option<ServiceResponse<Decimal, CartError>> {
    match receiver.recv().await {
        Some(CartRequest::CartTotal { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next message is a Dispatch request
pub async fn expect_dispatch(
    receiver: &mut mpsc::Receiver<CartRequest>,
) -> Option<(CartCommand, ServiceResponse<CartState, CartError>)> {
    match receiver.recv().await {
        Some(CartRequest::Dispatch { command, respond_to }) => Some((command, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Product, ProductId};

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_cart_client(10);

        let add_task = tokio::spawn(async move {
            let product = Product::new(1u64, "Test", Decimal::new(100, 0));
            client.add_to_cart(product).await
        });

        let (command, responder) = expect_dispatch(&mut receiver).await.expect("Expected Dispatch request");
        let state = CartState::new().apply(command.clone());
        assert!(matches!(command, CartCommand::AddToCart(ref p) if p.id == ProductId(1)));
        responder.send(Ok(state.clone())).unwrap();

        let result = add_task.await.unwrap();
        assert_eq!(result, Ok(state));
    }
}
