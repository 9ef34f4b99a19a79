//! Normalization of feed transactions into [`salesdb_core::NewProduct`].

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use salesdb_core::NewProduct;

use crate::error::FeedError;
use crate::types::FeedTransaction;

/// Normalizes a raw [`FeedTransaction`] into a [`NewProduct`].
///
/// Empty `description`/`category` strings are kept as-is; only absent values
/// become `None`.
///
/// # Errors
///
/// Returns [`FeedError::Normalization`] if the title is blank, the price is not
/// numeric, or `dateOfSale` is not a recognised date.
pub fn normalize_transaction(tx: FeedTransaction) -> Result<NewProduct, FeedError> {
    let id = tx.id;
    let fail = |reason: String| FeedError::Normalization { id, reason };

    if tx.title.trim().is_empty() {
        return Err(fail("title is empty".into()));
    }

    let price = parse_price(&tx.price)
        .ok_or_else(|| fail(format!("price is not a number: {}", tx.price)))?;

    let date_of_sale = parse_sale_date(&tx.date_of_sale)
        .ok_or_else(|| fail(format!("unrecognised dateOfSale \"{}\"", tx.date_of_sale)))?;

    Ok(NewProduct {
        source_id: id,
        title: tx.title,
        price,
        description: tx.description,
        category: tx.category,
        date_of_sale,
    })
}

/// Reads a price from a JSON number or a numeric string.
fn parse_price(value: &serde_json::Value) -> Option<Decimal> {
    let raw = match value {
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::String(s) => s.trim().to_string(),
        _ => return None,
    };

    Decimal::from_str(&raw)
        .or_else(|_| Decimal::from_scientific(&raw))
        .ok()
}

/// Parses a sale timestamp into UTC.
///
/// Accepts RFC 3339 with an offset, a naive `YYYY-MM-DDTHH:MM:SS[.fff]`
/// (read as UTC), or a bare `YYYY-MM-DD` (midnight UTC).
#[must_use]
pub fn parse_sale_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
