use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{error, info, instrument, warn};
use crate::checkout::{upi_pay_url, PaymentMethod, PaymentOutcome, PaymentReceipt};
use crate::clients::CartClient;
use crate::config::StoreConfig;
use crate::error::CheckoutError;

/// Runs a simulated payment against the current cart.
///
/// Reads the cart total once, pays it with the chosen method, and clears the
/// cart when the payment completes.
#[derive(Clone, Debug)]
pub struct CheckoutClient {
    cart_client: CartClient,
    config: StoreConfig,
}

impl CheckoutClient {
    pub fn new(cart_client: CartClient, config: StoreConfig) -> Self {
        Self { cart_client, config }
    }

    #[instrument(fields(method = %method.kind()), skip(self, method))]
    pub async fn pay(&self, method: PaymentMethod) -> Result<PaymentOutcome, CheckoutError> {
        info!("Processing checkout request");

        // Step 1: Read the amount once
        let amount = self.cart_client.cart_total().await?;
        if amount <= Decimal::ZERO {
            warn!("Checkout attempted with an empty cart");
            return Err(CheckoutError::EmptyCart);
        }
        info!(amount = %amount, "Cart total read");

        // Step 2: Simulate the payment
        let kind = method.kind();
        let delay = match method {
            PaymentMethod::Razorpay => self.config.razorpay_delay,
            PaymentMethod::CashOnDelivery => self.config.cod_delay,
            PaymentMethod::Stripe(card) => {
                if let Err(e) = card.validate() {
                    error!(error = %e, "Card validation failed");
                    return Err(e);
                }
                self.config.stripe_delay
            }
            PaymentMethod::Upi => {
                let txn_id = kind.txn_id(Utc::now());
                let pay_url = upi_pay_url(&self.config.upi_vpa, &self.config.merchant_name, &txn_id, amount);
                info!(txn_id = %txn_id, "Handing payment to UPI app");
                return Ok(PaymentOutcome::Redirect { pay_url, txn_id });
            }
        };
        tokio::time::sleep(delay).await;

        let paid_at = Utc::now();
        let receipt = PaymentReceipt {
            method: kind,
            amount,
            txn_id: kind.txn_id(paid_at),
            paid_at,
        };

        // Step 3: Clear the cart
        self.cart_client.clear_cart().await?;
        info!(txn_id = %receipt.txn_id, "Payment completed, cart cleared");
        Ok(PaymentOutcome::Completed(receipt))
    }
}
