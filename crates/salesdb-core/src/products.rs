use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A sale transaction normalized from the feed, ready for storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    /// Identifier assigned by the feed. Not unique and not the storage key.
    pub source_id: i64,
    pub title: String,
    pub price: Decimal,
    pub description: Option<String>,
    pub category: Option<String>,
    pub date_of_sale: DateTime<Utc>,
}
