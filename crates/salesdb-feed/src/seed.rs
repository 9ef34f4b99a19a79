use salesdb_db::DbError;
use sqlx::PgPool;
use thiserror::Error;

use crate::client::FeedClient;
use crate::error::FeedError;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("error fetching data from the product feed: {0}")]
    Fetch(#[from] FeedError),

    #[error("error seeding database: {0}")]
    Store(#[from] DbError),
}

/// Outcome of a successful seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub inserted: usize,
}

/// Replaces the stored product collection with the current feed contents.
///
/// The feed is fetched and normalized first; the store is only touched once
/// the whole feed is in hand, and the replace itself is a single transaction.
/// A failure at any step leaves the previous collection in place.
///
/// # Errors
///
/// Returns [`SeedError::Fetch`] if the feed cannot be fetched or normalized,
/// or [`SeedError::Store`] if the replace fails.
pub async fn seed_products(pool: &PgPool, feed: &FeedClient) -> Result<SeedReport, SeedError> {
    let products = feed.fetch_products().await?;
    tracing::info!(fetched = products.len(), url = %feed.url(), "fetched product feed");

    let inserted = salesdb_db::replace_products(pool, &products).await?;
    tracing::info!(inserted, "product collection reseeded");
    Ok(SeedReport { inserted })
}
