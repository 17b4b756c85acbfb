//! Runtime settings for the store system.

use std::num::{NonZeroUsize, ParseIntError};
use std::time::Duration;

use clap::Parser;

const DEFAULT_CHANNEL_BUFFER: NonZeroUsize = NonZeroUsize::MIN.saturating_add(31);

/// Channel sizes, catalog source, simulated payment delays and UPI payee fields.
///
/// Every field can be set on the command line or through a `STOREFRONT_*`
/// environment variable.
#[derive(Debug, Clone, PartialEq, Parser)]
#[command(name = "storefront", about = "Storefront cart store demo", long_about = None)]
pub struct StoreConfig {
    /// Request buffer of each service channel, at least 1
    #[arg(long, env = "STOREFRONT_CHANNEL_BUFFER", default_value = "32")]
    pub channel_buffer: NonZeroUsize,

    /// Base URL of the REST product catalog; the bundled catalog is used when unset
    #[arg(long, env = "STOREFRONT_CATALOG_URL")]
    pub catalog_url: Option<String>,

    /// Catalog request timeout in milliseconds
    #[arg(long = "catalog-timeout-ms", env = "STOREFRONT_CATALOG_TIMEOUT_MS", default_value = "5000", value_parser = parse_millis)]
    pub catalog_timeout: Duration,

    #[arg(long = "razorpay-delay-ms", env = "STOREFRONT_RAZORPAY_DELAY_MS", default_value = "900", value_parser = parse_millis)]
    pub razorpay_delay: Duration,

    #[arg(long = "stripe-delay-ms", env = "STOREFRONT_STRIPE_DELAY_MS", default_value = "1200", value_parser = parse_millis)]
    pub stripe_delay: Duration,

    #[arg(long = "cod-delay-ms", env = "STOREFRONT_COD_DELAY_MS", default_value = "700", value_parser = parse_millis)]
    pub cod_delay: Duration,

    /// UPI id payments are addressed to
    #[arg(long, env = "STOREFRONT_UPI_VPA", default_value = "merchant@upi")]
    pub upi_vpa: String,

    #[arg(long, env = "STOREFRONT_MERCHANT_NAME", default_value = "My E-Store")]
    pub merchant_name: String,
}

fn parse_millis(value: &str) -> Result<Duration, ParseIntError> {
    value.parse().map(Duration::from_millis)
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            channel_buffer: DEFAULT_CHANNEL_BUFFER,
            catalog_url: None,
            catalog_timeout: Duration::from_secs(5),
            razorpay_delay: Duration::from_millis(900),
            stripe_delay: Duration::from_millis(1200),
            cod_delay: Duration::from_millis(700),
            upi_vpa: "merchant@upi".to_string(),
            merchant_name: "My E-Store".to_string(),
        }
    }
}

impl StoreConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    pub fn with_payment_delay(mut self, delay: Duration) -> Self {
        self.razorpay_delay = delay;
        self.stripe_delay = delay;
        self.cod_delay = delay;
        self
    }
}
