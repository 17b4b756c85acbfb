//! Simulated payment methods and their receipts.
//!
//! Nothing here talks to a real gateway. Card checks are the same shallow
//! format checks a card-entry form would do.

use std::fmt;

use chrono::{DateTime, Utc};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CheckoutError;

/// Card fields as typed into the card-entry form.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct CardDetails {
    pub number: String,
    pub holder: String,
    /// `MM/YY`
    pub expiry: String,
    pub cvv: String,
}

// Card data stays out of logs.
impl fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits: String = self.number.chars().filter(char::is_ascii_digit).collect();
        let last4 = digits.get(digits.len().saturating_sub(4)..).unwrap_or_default();
        f.debug_struct("CardDetails")
            .field("number", &format_args!("**** {}", last4))
            .field("holder", &self.holder)
            .finish_non_exhaustive()
    }
}

impl CardDetails {
    pub fn new(
        number: impl Into<String>,
        holder: impl Into<String>,
        expiry: impl Into<String>,
        cvv: impl Into<String>,
    ) -> Self {
        Self {
            number: number.into(),
            holder: holder.into(),
            expiry: expiry.into(),
            cvv: cvv.into(),
        }
    }

    /// Checks the form fields in display order and reports the first problem.
    ///
    /// # Errors
    /// `CheckoutError::InvalidCard` naming the offending field.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        let invalid = |reason: &str| Err(CheckoutError::InvalidCard(reason.to_string()));

        let digits: String = self.number.chars().filter(|c| !c.is_whitespace()).collect();
        if digits.len() != 16 || !digits.chars().all(|c| c.is_ascii_digit()) {
            return invalid("Enter a valid 16-digit card number");
        }
        if self.holder.trim().chars().count() < 3 {
            return invalid("Enter card holder name");
        }

        let expiry = self.expiry.as_bytes();
        let well_formed = expiry.len() == 5
            && expiry[2] == b'/'
            && expiry[..2].iter().chain(&expiry[3..]).all(u8::is_ascii_digit);
        if !well_formed {
            return invalid("Expiry must be in MM/YY");
        }
        let month: u32 = self.expiry[..2].parse().unwrap_or(0);
        if !(1..=12).contains(&month) {
            return invalid("Enter a valid expiry month (01-12)");
        }

        if !(3..=4).contains(&self.cvv.len()) || !self.cvv.chars().all(|c| c.is_ascii_digit()) {
            return invalid("Enter a valid CVV (3 or 4 digits)");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PaymentMethod {
    Razorpay,
    Stripe(CardDetails),
    CashOnDelivery,
    Upi,
}

impl PaymentMethod {
    pub fn kind(&self) -> PaymentKind {
        match self {
            Self::Razorpay => PaymentKind::Razorpay,
            Self::Stripe(_) => PaymentKind::Stripe,
            Self::CashOnDelivery => PaymentKind::CashOnDelivery,
            Self::Upi => PaymentKind::Upi,
        }
    }
}

/// Payment method without its payload, for receipts and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentKind {
    Razorpay,
    Stripe,
    CashOnDelivery,
    Upi,
}

impl PaymentKind {
    /// Prefix of the simulated transaction id.
    pub fn txn_prefix(self) -> &'static str {
        match self {
            Self::Razorpay => "fake_razorpay",
            Self::Stripe => "fake_stripe",
            Self::CashOnDelivery => "cod",
            Self::Upi => "txn",
        }
    }

    pub fn txn_id(self, at: DateTime<Utc>) -> String {
        format!("{}_{}", self.txn_prefix(), at.timestamp_millis())
    }
}

impl fmt::Display for PaymentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Razorpay => "razorpay",
            Self::Stripe => "stripe",
            Self::CashOnDelivery => "cod",
            Self::Upi => "upi",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub method: PaymentKind,
    pub amount: Decimal,
    pub txn_id: String,
    pub paid_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PaymentOutcome {
    /// Simulated payment went through and the cart was cleared.
    Completed(PaymentReceipt),
    /// Payment continues in an external UPI app; the cart is left alone.
    Redirect { pay_url: String, txn_id: String },
}

/// Builds the `upi://pay` deep link for `amount`.
pub fn upi_pay_url(vpa: &str, merchant: &str, txn_id: &str, amount: Decimal) -> String {
    let mut amount = amount.round_dp(2);
    amount.rescale(2);
    format!(
        "upi://pay?pa={}&pn={}&tr={}&am={}&cu=INR&tn={}",
        encode_component(vpa),
        encode_component(merchant),
        txn_id,
        amount,
        encode_component("Order Payment"),
    )
}

// Everything but the unreserved URI characters.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}
