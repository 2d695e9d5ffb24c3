//! Status Routes - Provider Availability

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use crate::services::provider_status::{AggregatedStatus, StatusAggregator};
use crate::AppState;

/// Aggregated health/quota for every configured AI provider
#[utoipa::path(
    get,
    path = "/status",
    responses(
        (status = 200, description = "One entry per configured provider, unavailable ones included")
    ),
    tag = "Status"
)]
pub async fn get_status(
    State(aggregator): State<Arc<StatusAggregator>>,
) -> Json<AggregatedStatus> {
    Json(aggregator.get_status().await)
}

pub fn router() -> Router<AppState> {
    Router::new().route("/status", get(get_status))
}
