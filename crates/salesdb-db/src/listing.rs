//! Paginated, searchable product listing.

use salesdb_core::Month;
use sqlx::PgPool;

use crate::stats::month_param;
use crate::{DbError, ProductRow};

/// Input filters for product listing.
///
/// `page` is 1-based. Callers are expected to pass already-normalized values;
/// `page < 1` is treated as `1` and `per_page < 1` as `1`.
#[derive(Debug, Clone, Default)]
pub struct ProductListFilters<'a> {
    pub search: Option<&'a str>,
    pub month: Option<Month>,
    pub page: i64,
    pub per_page: i64,
}

/// One page of products plus the total number of matches across all pages.
#[derive(Debug, Clone)]
pub struct ProductPage {
    pub total_count: i64,
    pub page: i64,
    pub per_page: i64,
    pub rows: Vec<ProductRow>,
}

impl ProductListFilters<'_> {
    /// Number of matching rows preceding this page.
    #[must_use]
    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1).saturating_mul(self.per_page.max(1))
    }
}

/// Returns one page of products matching `filters`, ordered by storage key.
///
/// `search` matches case-insensitively as a literal substring of the title,
/// the description, or the price rendered as text. An empty or all-whitespace
/// search is ignored. `month` matches the UTC calendar month of the sale in
/// any year.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if either query fails.
pub async fn list_products(
    pool: &PgPool,
    filters: ProductListFilters<'_>,
) -> Result<ProductPage, DbError> {
    let pattern = filters
        .search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(like_pattern);
    let month = filters.month.map(month_param);
    let page = filters.page.max(1);
    let per_page = filters.per_page.max(1);

    let rows = sqlx::query_as::<_, ProductRow>(
        "SELECT id, source_id, title, price, description, category, date_of_sale \
         FROM products \
         WHERE ($1::TEXT IS NULL \
                OR title ILIKE $1 \
                OR description ILIKE $1 \
                OR price::TEXT ILIKE $1) \
           AND ($2::INT IS NULL \
                OR EXTRACT(MONTH FROM date_of_sale AT TIME ZONE 'UTC') = $2) \
         ORDER BY id \
         LIMIT $3 OFFSET $4",
    )
    .bind(pattern.as_deref())
    .bind(month)
    .bind(per_page)
    .bind(filters.offset())
    .fetch_all(pool)
    .await?;

    let total_count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) \
         FROM products \
         WHERE ($1::TEXT IS NULL \
                OR title ILIKE $1 \
                OR description ILIKE $1 \
                OR price::TEXT ILIKE $1) \
           AND ($2::INT IS NULL \
                OR EXTRACT(MONTH FROM date_of_sale AT TIME ZONE 'UTC') = $2)",
    )
    .bind(pattern.as_deref())
    .bind(month)
    .fetch_one(pool)
    .await?;

    Ok(ProductPage {
        total_count,
        page,
        per_page,
        rows,
    })
}

/// Wraps `search` in `%...%`, escaping the `ILIKE` metacharacters so the text
/// matches literally.
fn like_pattern(search: &str) -> String {
    let mut pattern = String::with_capacity(search.len() + 2);
    pattern.push('%');
    for ch in search.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
