//! Document Routes - Upload & Processing
//!
//! Accepts a multipart batch of course documents plus a processing
//! instruction, runs the pipeline, and records the completed batch to
//! history fire-and-forget.

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};

use mentora::{DocumentFile, DomainError, HistoryCategory, MAX_TOTAL_UPLOAD_BYTES};

use crate::models::ProcessDocumentsResponse;
use crate::AppState;

/// Headroom for multipart framing on top of the batch ceiling
const BODY_LIMIT_BYTES: usize = MAX_TOTAL_UPLOAD_BYTES + 1024 * 1024;

/// Upload one or more course documents and process them as a batch
#[utoipa::path(
    post,
    path = "/documents/process",
    request_body(content = Vec<u8>, content_type = "multipart/form-data",
        description = "Repeated `files` parts plus `instruction` and `user_id` fields"),
    responses(
        (status = 200, description = "Combined result, per-file failures included", body = ProcessDocumentsResponse),
        (status = 400, description = "Precondition violation, nothing uploaded")
    ),
    tag = "Documents"
)]
pub async fn process_documents(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ProcessDocumentsResponse>, (StatusCode, String)> {
    let mut files: Vec<DocumentFile> = Vec::new();
    let mut instruction = String::new();
    let mut user_id = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?
    {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "files" => {
                let name = field.file_name().unwrap_or("document").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?
                    .to_vec();
                files.push(DocumentFile {
                    name,
                    content_type,
                    bytes,
                });
            }
            "instruction" => {
                instruction = field
                    .text()
                    .await
                    .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
            }
            "user_id" => {
                user_id = field
                    .text()
                    .await
                    .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
            }
            _ => {}
        }
    }

    let file_names = files
        .iter()
        .map(|f| f.name.clone())
        .collect::<Vec<_>>()
        .join(", ");

    let result = state
        .pipeline
        .process_documents(files, &instruction, &user_id)
        .await
        .map_err(|e| match e {
            DomainError::Validation(message) => (StatusCode::BAD_REQUEST, message),
            other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
        })?;

    state.recorder.record(
        &user_id,
        &instruction,
        &result.combined_text,
        HistoryCategory::Document,
        Some(&format!("Files: {}", file_names)),
    );

    Ok(Json(ProcessDocumentsResponse::from(result)))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/documents/process", post(process_documents))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
}
