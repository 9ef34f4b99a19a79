//! Storage for the `products` table: full-collection replace and counts.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use salesdb_core::NewProduct;
use sqlx::PgPool;

use crate::DbError;

/// A row from the `products` table.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct ProductRow {
    /// Storage key; ascending in insertion order.
    pub id: i64,
    pub source_id: i64,
    pub title: String,
    pub price: Decimal,
    pub description: Option<String>,
    pub category: Option<String>,
    pub date_of_sale: DateTime<Utc>,
}

/// Replaces the entire product collection with `products`.
///
/// The delete and every insert run inside a single transaction; if any
/// statement fails the previous collection is left in place. Rows are
/// inserted in slice order, so storage keys follow feed order.
///
/// Returns the number of rows inserted.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any database operation fails.
pub async fn replace_products(pool: &PgPool, products: &[NewProduct]) -> Result<usize, DbError> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM products")
        .execute(&mut *tx)
        .await?;

    let mut count = 0usize;
    for product in products {
        sqlx::query(
            "INSERT INTO products \
                 (source_id, title, price, description, category, date_of_sale) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(product.source_id)
        .bind(&product.title)
        .bind(product.price)
        .bind(&product.description)
        .bind(&product.category)
        .bind(product.date_of_sale)
        .execute(&mut *tx)
        .await?;

        count += 1;
    }

    tx.commit().await?;
    Ok(count)
}

/// Total number of stored records.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn count_products(pool: &PgPool) -> Result<i64, DbError> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
