mod products;
mod seed;
mod statistics;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use salesdb_core::Month;
use salesdb_feed::FeedClient;
use serde::Serialize;
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, RequestId, REQUEST_ID_HEADER};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub feed: Arc<FeedClient>,
}

/// Error response body: `{"success": false, "message": "..."}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    success: bool,
    message: &'a str,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthBody {
    success: bool,
    status: &'static str,
    database: &'static str,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    /// Logs `error` against the request and turns it into a 500 carrying the
    /// error's display text.
    pub fn internal(req_id: &RequestId, error: &dyn std::error::Error) -> Self {
        tracing::error!(request_id = %req_id.0, error = %error, "request failed");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: error.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let body = ErrorBody {
            success: false,
            message: &self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

/// Resolves a month token from a path or query parameter. An unrecognised
/// month is an engine failure and maps to 500.
pub(super) fn resolve_month(req_id: &RequestId, raw: &str) -> Result<Month, ApiError> {
    raw.parse::<Month>()
        .map_err(|e| ApiError::internal(req_id, &e))
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
        .expose_headers([HeaderName::from_static(REQUEST_ID_HEADER)])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/seed", get(seed::seed))
        .route("/api/v1/products", get(products::list_products))
        .route("/api/v1/statistics", get(statistics::monthly_statistics))
        .route(
            "/api/v1/price-range-statistics/{month}",
            get(statistics::price_range_statistics),
        )
        .route(
            "/api/v1/unique-categories/{month}",
            get(statistics::unique_categories),
        )
        .route(
            "/api/v1/combined-statistics/{month}",
            get(statistics::combined_statistics),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    match salesdb_db::health_check(&state.pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthBody {
                success: true,
                status: "ok",
                database: "ok",
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health check: database unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthBody {
                    success: false,
                    status: "degraded",
                    database: "unavailable",
                }),
            )
        }
    }
}
