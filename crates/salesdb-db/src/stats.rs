//! Month-scoped sales statistics.
//!
//! Every query here matches sales by the UTC calendar month of `date_of_sale`,
//! ignoring the year, so `March` covers March of every year in the table.

use rust_decimal::Decimal;
use salesdb_core::{histogram, Month, PriceBandCount};
use sqlx::PgPool;
use thiserror::Error;

use crate::DbError;

/// Sales totals for one month against the whole collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyStatistics {
    pub total_sales_amount: Decimal,
    pub total_sold_items: i64,
    /// Records that did not sell in this month, i.e. total records minus
    /// `total_sold_items`. Not a stock figure.
    pub total_not_sold_items: i64,
}

/// Per-category sale count for a month. `category` is `None` for records
/// stored without one; those form their own group.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct CategoryCountRow {
    pub category: Option<String>,
    pub item_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinedStatistics {
    pub statistics: MonthlyStatistics,
    pub bar_chart: Vec<PriceBandCount>,
    pub pie_chart: Vec<CategoryCountRow>,
}

/// Failure of one of the sections of [`combined_statistics`].
#[derive(Debug, Error)]
#[error("error fetching combined statistics ({section}): {source}")]
pub struct CombinedStatsError {
    pub section: &'static str,
    #[source]
    pub source: DbError,
}

#[derive(Debug, sqlx::FromRow)]
struct MonthlyTotalsRow {
    total_sales_amount: Decimal,
    total_sold_items: i64,
    total_items: i64,
}

/// Sum of prices and sale count for `month`, plus the complement against the
/// full collection. Computed in one statement so both counts see the same
/// snapshot.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn monthly_statistics(pool: &PgPool, month: Month) -> Result<MonthlyStatistics, DbError> {
    let row = sqlx::query_as::<_, MonthlyTotalsRow>(
        "SELECT \
             COALESCE(SUM(price) FILTER ( \
                 WHERE EXTRACT(MONTH FROM date_of_sale AT TIME ZONE 'UTC') = $1), 0) \
                 AS total_sales_amount, \
             COUNT(*) FILTER ( \
                 WHERE EXTRACT(MONTH FROM date_of_sale AT TIME ZONE 'UTC') = $1) \
                 AS total_sold_items, \
             COUNT(*) AS total_items \
         FROM products",
    )
    .bind(month_param(month))
    .fetch_one(pool)
    .await?;

    Ok(MonthlyStatistics {
        total_sales_amount: row.total_sales_amount,
        total_sold_items: row.total_sold_items,
        total_not_sold_items: row.total_items - row.total_sold_items,
    })
}

/// Histogram of sale prices for `month` over the fixed price bands. All bands
/// are returned in order, including empty ones.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn price_range_statistics(
    pool: &PgPool,
    month: Month,
) -> Result<Vec<PriceBandCount>, DbError> {
    let prices = sqlx::query_scalar::<_, Decimal>(
        "SELECT price FROM products \
         WHERE EXTRACT(MONTH FROM date_of_sale AT TIME ZONE 'UTC') = $1",
    )
    .bind(month_param(month))
    .fetch_all(pool)
    .await?;

    Ok(histogram(prices))
}

/// Sale counts per category for `month`, alphabetical with the missing
/// category last.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn unique_categories_by_month(
    pool: &PgPool,
    month: Month,
) -> Result<Vec<CategoryCountRow>, DbError> {
    let rows = sqlx::query_as::<_, CategoryCountRow>(
        "SELECT category, COUNT(*) AS item_count \
         FROM products \
         WHERE EXTRACT(MONTH FROM date_of_sale AT TIME ZONE 'UTC') = $1 \
         GROUP BY category \
         ORDER BY category ASC NULLS LAST",
    )
    .bind(month_param(month))
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Runs the three statistics views for `month` in sequence.
///
/// # Errors
///
/// Returns [`CombinedStatsError`] naming the first section that failed.
pub async fn combined_statistics(
    pool: &PgPool,
    month: Month,
) -> Result<CombinedStatistics, CombinedStatsError> {
    let statistics = monthly_statistics(pool, month)
        .await
        .map_err(|source| CombinedStatsError {
            section: "statistics",
            source,
        })?;
    let bar_chart = price_range_statistics(pool, month)
        .await
        .map_err(|source| CombinedStatsError {
            section: "price ranges",
            source,
        })?;
    let pie_chart = unique_categories_by_month(pool, month)
        .await
        .map_err(|source| CombinedStatsError {
            section: "categories",
            source,
        })?;

    Ok(CombinedStatistics {
        statistics,
        bar_chart,
        pie_chart,
    })
}

pub(crate) fn month_param(month: Month) -> i32 {
    // Month numbers are 1..=12.
    i32::try_from(month.number()).unwrap_or_default()
}
