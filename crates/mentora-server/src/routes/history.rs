//! History Routes - Interaction Records

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use mentora::HistoryRepository;

use crate::models::{HistoryEntryResponse, RecordHistoryRequest, RecordHistoryResponse};
use crate::AppState;

/// Record a completed interaction (best-effort, accepted immediately)
#[utoipa::path(
    post,
    path = "/history",
    request_body = RecordHistoryRequest,
    responses(
        (status = 200, description = "Entry handed to the history worker", body = RecordHistoryResponse)
    ),
    tag = "History"
)]
pub async fn record_history(
    State(state): State<AppState>,
    Json(payload): Json<RecordHistoryRequest>,
) -> Json<RecordHistoryResponse> {
    state.recorder.record(
        &payload.user_id,
        &payload.query,
        &payload.answer,
        payload.category,
        payload.metadata.as_deref(),
    );

    Json(RecordHistoryResponse { accepted: true })
}

/// Most recent interactions for a user
#[utoipa::path(
    get,
    path = "/history/{user_id}",
    params(
        ("user_id" = String, Path, description = "Owner identity")
    ),
    responses(
        (status = 200, description = "Newest-first history entries", body = Vec<HistoryEntryResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "History"
)]
pub async fn list_history(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<HistoryEntryResponse>>, (StatusCode, String)> {
    let entries = state
        .history_repo
        .find_by_user(&user_id, 100)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(
        entries.into_iter().map(HistoryEntryResponse::from).collect(),
    ))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/history", post(record_history))
        .route("/history/:user_id", get(list_history))
}
