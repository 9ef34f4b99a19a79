pub mod app_config;
pub mod config;
pub mod month;
pub mod price_band;
pub mod products;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use month::{Month, MonthError};
pub use price_band::{histogram, PriceBand, PriceBandCount, PRICE_BANDS};
pub use products::NewProduct;

use thiserror::Error;

/// Default location of the product transaction feed used to seed the store.
pub const DEFAULT_FEED_URL: &str = "https://s3.amazonaws.com/roxiler.com/product_transaction.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
