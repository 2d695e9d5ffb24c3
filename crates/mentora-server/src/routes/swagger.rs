//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::OpenApi;

use crate::models::{
    HistoryEntryResponse, ProcessDocumentsResponse, RecordHistoryRequest, RecordHistoryResponse,
    UploadOutcomeResponse,
};
use crate::services::provider_status::ProviderStatus;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::proxy::forward_function,
        crate::routes::status::get_status,
        crate::routes::documents::process_documents,
        crate::routes::history::record_history,
        crate::routes::history::list_history,
    ),
    components(schemas(
        ProviderStatus,
        ProcessDocumentsResponse,
        UploadOutcomeResponse,
        RecordHistoryRequest,
        RecordHistoryResponse,
        HistoryEntryResponse,
    )),
    tags(
        (name = "Proxy", description = "Upstream function gateway"),
        (name = "Status", description = "Provider availability and quota"),
        (name = "Documents", description = "Document upload and processing"),
        (name = "History", description = "Interaction history"),
    )
)]
pub struct ApiDoc;
