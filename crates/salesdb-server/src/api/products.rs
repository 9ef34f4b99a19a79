use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{resolve_month, ApiError, AppState};

const DEFAULT_PER_PAGE: i64 = 10;
const MAX_PER_PAGE: i64 = 100;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ProductItem {
    id: i64,
    title: String,
    #[serde(with = "rust_decimal::serde::float")]
    price: Decimal,
    description: Option<String>,
    category: Option<String>,
    date_of_sale: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ProductListBody {
    success: bool,
    total_count: i64,
    page: i64,
    per_page: i64,
    data: Vec<ProductItem>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ProductQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub search: Option<String>,
    pub month: Option<String>,
}

pub(super) fn normalize_page(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}

pub(super) fn normalize_per_page(per_page: Option<i64>) -> i64 {
    per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE)
}

pub(super) async fn list_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    query: Result<Query<ProductQuery>, QueryRejection>,
) -> Result<Json<ProductListBody>, ApiError> {
    let Query(query) = query.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

    let month = match query.month.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => Some(resolve_month(&req_id, raw)?),
        _ => None,
    };

    let page = salesdb_db::list_products(
        &state.pool,
        salesdb_db::ProductListFilters {
            search: query.search.as_deref(),
            month,
            page: normalize_page(query.page),
            per_page: normalize_per_page(query.per_page),
        },
    )
    .await
    .map_err(|e| ApiError::internal(&req_id, &e))?;

    let data = page
        .rows
        .into_iter()
        .map(|row| ProductItem {
            id: row.source_id,
            title: row.title,
            price: row.price,
            description: row.description,
            category: row.category,
            date_of_sale: row.date_of_sale,
        })
        .collect();

    Ok(Json(ProductListBody {
        success: true,
        total_count: page.total_count,
        page: page.page,
        per_page: page.per_page,
        data,
    }))
}
