use axum::{extract::State, Extension, Json};
use serde::Serialize;

use crate::middleware::RequestId;

use super::{ApiError, AppState};

#[derive(Debug, Serialize)]
pub(super) struct SeedBody {
    message: &'static str,
}

/// Replaces the stored products with the current feed contents.
pub(super) async fn seed(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<SeedBody>, ApiError> {
    salesdb_feed::seed_products(&state.pool, &state.feed)
        .await
        .map_err(|e| ApiError::internal(&req_id, &e))?;

    Ok(Json(SeedBody {
        message: "Database seeded successfully!",
    }))
}
