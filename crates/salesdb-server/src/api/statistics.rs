use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    Extension, Json,
};
use rust_decimal::Decimal;
use salesdb_core::PriceBandCount;
use salesdb_db::{CategoryCountRow, MonthlyStatistics};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{resolve_month, ApiError, AppState};

const MONTH_REQUIRED: &str = "Month parameter is required.";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct StatisticsItem {
    #[serde(with = "rust_decimal::serde::float")]
    total_sales_amount: Decimal,
    total_sold_items: i64,
    total_not_sold_items: i64,
}

impl From<MonthlyStatistics> for StatisticsItem {
    fn from(stats: MonthlyStatistics) -> Self {
        Self {
            total_sales_amount: stats.total_sales_amount,
            total_sold_items: stats.total_sold_items,
            total_not_sold_items: stats.total_not_sold_items,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CategoryItem {
    category: Option<String>,
    item_count: i64,
}

impl From<CategoryCountRow> for CategoryItem {
    fn from(row: CategoryCountRow) -> Self {
        Self {
            category: row.category,
            item_count: row.item_count,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CombinedItem {
    statistics: StatisticsItem,
    bar_chart_data: Vec<PriceBandCount>,
    pie_chart_data: Vec<CategoryItem>,
}

#[derive(Debug, Serialize)]
pub(super) struct StatisticsBody {
    success: bool,
    #[serde(flatten)]
    statistics: StatisticsItem,
}

#[derive(Debug, Serialize)]
pub(super) struct DataBody<T: Serialize> {
    success: bool,
    data: T,
}

impl<T: Serialize> DataBody<T> {
    fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct StatisticsQuery {
    pub month: Option<String>,
}

fn month_segment(path: Result<Path<String>, PathRejection>) -> Result<String, ApiError> {
    path.map(|Path(month)| month)
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))
}

pub(super) async fn monthly_statistics(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    query: Result<Query<StatisticsQuery>, QueryRejection>,
) -> Result<Json<StatisticsBody>, ApiError> {
    let Query(query) = query.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    let raw = query
        .month
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .ok_or_else(|| ApiError::bad_request(MONTH_REQUIRED))?;
    let month = resolve_month(&req_id, raw)?;

    let stats = salesdb_db::monthly_statistics(&state.pool, month)
        .await
        .map_err(|e| ApiError::internal(&req_id, &e))?;

    Ok(Json(StatisticsBody {
        success: true,
        statistics: stats.into(),
    }))
}

pub(super) async fn price_range_statistics(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    month: Result<Path<String>, PathRejection>,
) -> Result<Json<DataBody<Vec<PriceBandCount>>>, ApiError> {
    let month = resolve_month(&req_id, &month_segment(month)?)?;
    let bands = salesdb_db::price_range_statistics(&state.pool, month)
        .await
        .map_err(|e| ApiError::internal(&req_id, &e))?;

    Ok(DataBody::ok(bands))
}

pub(super) async fn unique_categories(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    month: Result<Path<String>, PathRejection>,
) -> Result<Json<DataBody<Vec<CategoryItem>>>, ApiError> {
    let month = resolve_month(&req_id, &month_segment(month)?)?;
    let rows = salesdb_db::unique_categories_by_month(&state.pool, month)
        .await
        .map_err(|e| ApiError::internal(&req_id, &e))?;

    Ok(DataBody::ok(rows.into_iter().map(CategoryItem::from).collect()))
}

pub(super) async fn combined_statistics(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    month: Result<Path<String>, PathRejection>,
) -> Result<Json<DataBody<CombinedItem>>, ApiError> {
    let month = resolve_month(&req_id, &month_segment(month)?)?;
    let combined = salesdb_db::combined_statistics(&state.pool, month)
        .await
        .map_err(|e| ApiError::internal(&req_id, &e))?;

    Ok(DataBody::ok(CombinedItem {
        statistics: combined.statistics.into(),
        bar_chart_data: combined.bar_chart,
        pie_chart_data: combined
            .pie_chart
            .into_iter()
            .map(CategoryItem::from)
            .collect(),
    }))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use super::super::test_support::{app, get_json, insert_product, seed_march_scenario};

    #[sqlx::test(migrations = "../../migrations")]
    async fn statistics_without_month_is_bad_request(pool: sqlx::PgPool) {
        let (status, json) = get_json(app(pool), "/api/v1/statistics").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json,
            json!({ "success": false, "message": "Month parameter is required." })
        );
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn statistics_with_blank_month_is_bad_request(pool: sqlx::PgPool) {
        let (status, _) = get_json(app(pool), "/api/v1/statistics?month=").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn statistics_for_march_scenario(pool: sqlx::PgPool) {
        seed_march_scenario(&pool).await;

        let (status, json) = get_json(app(pool), "/api/v1/statistics?month=March").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        assert_eq!(json["totalSalesAmount"], 200.0);
        assert_eq!(json["totalSoldItems"], 2);
        assert_eq!(json["totalNotSoldItems"], 0);
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn statistics_count_unsold_against_whole_collection(pool: sqlx::PgPool) {
        seed_march_scenario(&pool).await;
        insert_product(&pool, 3, "Ring", "20", None, "2021-08-10T00:00:00Z").await;

        let (_, json) = get_json(app(pool), "/api/v1/statistics?month=aug").await;

        assert_eq!(json["totalSalesAmount"], 20.0);
        assert_eq!(json["totalSoldItems"], 1);
        assert_eq!(json["totalNotSoldItems"], 2);
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn invalid_month_tokens_are_server_errors(pool: sqlx::PgPool) {
        for uri in [
            "/api/v1/statistics?month=13",
            "/api/v1/price-range-statistics/Not-A-Month",
            "/api/v1/unique-categories/13",
            "/api/v1/combined-statistics/Not-A-Month",
        ] {
            let (status, json) = get_json(app(pool.clone()), uri).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
            assert_eq!(json["success"], false, "{uri}");
            assert!(
                json["message"].as_str().is_some_and(|m| m.contains("invalid month")),
                "{uri}: {json}"
            );
        }
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn undecodable_month_segment_is_json_bad_request(pool: sqlx::PgPool) {
        for uri in [
            "/api/v1/price-range-statistics/%FF",
            "/api/v1/unique-categories/%FF",
            "/api/v1/combined-statistics/%FF",
        ] {
            let (status, json) = get_json(app(pool.clone()), uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(json["success"], false, "{uri}");
            assert!(json["message"].is_string(), "{uri}: {json}");
        }
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn malformed_statistics_query_is_json_bad_request(pool: sqlx::PgPool) {
        let (status, json) = get_json(app(pool), "/api/v1/statistics?month=3&month=4").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
        assert!(json["message"].is_string(), "{json}");
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn price_ranges_return_all_bands(pool: sqlx::PgPool) {
        seed_march_scenario(&pool).await;

        let (status, json) = get_json(app(pool), "/api/v1/price-range-statistics/March").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        let bands = json["data"].as_array().expect("data array");
        assert_eq!(bands.len(), 10);
        assert_eq!(bands[0], json!({ "range": "0 - 100", "count": 1 }));
        assert_eq!(bands[1], json!({ "range": "101 - 200", "count": 1 }));
        assert_eq!(bands[9], json!({ "range": "901 - above", "count": 0 }));
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn unique_categories_include_null_group(pool: sqlx::PgPool) {
        seed_march_scenario(&pool).await;
        insert_product(&pool, 3, "Mystery", "5", None, "2020-03-11T00:00:00Z").await;

        let (status, json) = get_json(app(pool), "/api/v1/unique-categories/03").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json["data"],
            json!([
                { "category": "A", "itemCount": 1 },
                { "category": "B", "itemCount": 1 },
                { "category": null, "itemCount": 1 }
            ])
        );
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn combined_statistics_bundle_the_three_views(pool: sqlx::PgPool) {
        seed_march_scenario(&pool).await;

        let (status, json) = get_json(app(pool), "/api/v1/combined-statistics/mar").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        let data = &json["data"];
        assert_eq!(data["statistics"]["totalSalesAmount"], 200.0);
        assert_eq!(data["statistics"]["totalSoldItems"], 2);
        assert!(data["statistics"].get("success").is_none());
        assert_eq!(data["barChartData"].as_array().map(Vec::len), Some(10));
        assert_eq!(data["pieChartData"].as_array().map(Vec::len), Some(2));
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn combined_statistics_surface_store_failures(pool: sqlx::PgPool) {
        sqlx::query("DROP TABLE products")
            .execute(&pool)
            .await
            .expect("drop table");

        let (status, json) = get_json(app(pool), "/api/v1/combined-statistics/March").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(json["message"]
            .as_str()
            .is_some_and(|m| m.starts_with("error fetching combined statistics (statistics)")));
    }
}
