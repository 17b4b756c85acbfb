#[cfg(test)]
mod tests {
    use std::time::Duration;
    use rust_decimal::Decimal;
    use crate::actors::CartService;
    use crate::cart_actor::CartCommand;
    use crate::checkout::{CardDetails, PaymentKind, PaymentMethod, PaymentOutcome};
    use crate::clients::CheckoutClient;
    use crate::config::StoreConfig;
    use crate::domain::{CartState, Product};
    use crate::error::CheckoutError;
    use crate::mock_framework::{create_mock_cart_client, expect_cart_total, expect_dispatch};

    fn fast_config() -> StoreConfig {
        StoreConfig::default().with_payment_delay(Duration::from_millis(1))
    }

    #[tokio::test]
    async fn test_cod_checkout_flow() {
        // 1. Setup Mocks
        let (cart_client, mut cart_rx) = create_mock_cart_client(10);
        let checkout = CheckoutClient::new(cart_client, fast_config());

        // 2. Execute Checkout in background
        let checkout_task = tokio::spawn(async move { checkout.pay(PaymentMethod::CashOnDelivery).await });

        // 3. Verify Interactions

        // Expect the total to be read once
        let responder = expect_cart_total(&mut cart_rx).await.expect("Expected CartTotal");
        responder.send(Ok(Decimal::new(2498, 2))).unwrap();

        // Expect the cart to be cleared
        let (command, responder) = expect_dispatch(&mut cart_rx).await.expect("Expected Dispatch");
        assert_eq!(command, CartCommand::ClearCart);
        responder.send(Ok(CartState::default())).unwrap();

        // 4. Verify Result
        match checkout_task.await.unwrap() {
            Ok(PaymentOutcome::Completed(receipt)) => {
                assert_eq!(receipt.amount, Decimal::new(2498, 2));
                assert_eq!(receipt.method, PaymentKind::CashOnDelivery);
                assert!(receipt.txn_id.starts_with("cod_"));
            }
            other => panic!("Unexpected outcome: {:?}", other),
        }
        assert!(cart_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_empty_cart_issues_no_command() {
        let (cart_client, mut cart_rx) = create_mock_cart_client(10);
        let checkout = CheckoutClient::new(cart_client, fast_config());

        let checkout_task = tokio::spawn(async move { checkout.pay(PaymentMethod::Razorpay).await });

        let responder = expect_cart_total(&mut cart_rx).await.expect("Expected CartTotal");
        responder.send(Ok(Decimal::ZERO)).unwrap();

        assert_eq!(checkout_task.await.unwrap(), Err(CheckoutError::EmptyCart));
        assert!(cart_rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_invalid_card_keeps_cart() {
        let (cart_client, mut cart_rx) = create_mock_cart_client(10);
        let checkout = CheckoutClient::new(cart_client, fast_config());

        let card = CardDetails::new("4242", "Ada Lovelace", "12/30", "123");
        let checkout_task = tokio::spawn(async move { checkout.pay(PaymentMethod::Stripe(card)).await });

        let responder = expect_cart_total(&mut cart_rx).await.expect("Expected CartTotal");
        responder.send(Ok(Decimal::new(10, 0))).unwrap();

        assert!(matches!(checkout_task.await.unwrap(), Err(CheckoutError::InvalidCard(_))));
        assert!(cart_rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_checkout_against_running_cart() -> Result<(), Box<dyn std::error::Error>> {
        let (service, cart_client) = CartService::new(10);
        tokio::spawn(service.run());
        let checkout = CheckoutClient::new(cart_client.clone(), fast_config());

        cart_client.add_to_cart(Product::new(1u64, "Backpack", Decimal::new(999, 2))).await?;
        cart_client.add_to_cart(Product::new(2u64, "T-Shirt", Decimal::new(500, 2))).await?;
        cart_client.add_to_favourites(Product::new(3u64, "Ring", Decimal::new(69500, 2))).await?;

        // UPI hands off to an external app and leaves the cart alone
        match checkout.pay(PaymentMethod::Upi).await? {
            PaymentOutcome::Redirect { pay_url, txn_id } => {
                assert!(pay_url.starts_with("upi://pay?"));
                assert!(pay_url.contains("&am=14.99&"));
                assert!(txn_id.starts_with("txn_"));
            }
            other => panic!("Unexpected outcome: {:?}", other),
        }
        assert_eq!(cart_client.cart_item_count().await?, 2);

        let card = CardDetails::new("4242 4242 4242 4242", "Ada Lovelace", "12/30", "123");
        let outcome = checkout.pay(PaymentMethod::Stripe(card)).await?;
        assert!(matches!(outcome, PaymentOutcome::Completed(ref r) if r.amount == Decimal::new(1499, 2)));

        let state = cart_client.snapshot().await?;
        assert!(state.lines().is_empty());
        assert!(state.favourites().is_empty());
        Ok(())
    }
}
