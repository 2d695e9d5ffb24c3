//! History DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use mentora::{HistoryCategory, HistoryEntry};

/// Record a completed interaction
#[derive(Debug, Deserialize, ToSchema)]
pub struct RecordHistoryRequest {
    pub user_id: String,
    pub query: String,
    pub answer: String,
    #[serde(default)]
    #[schema(value_type = String, example = "question")]
    pub category: HistoryCategory,
    /// Optional free-text context (e.g. source file names)
    pub metadata: Option<String>,
}

/// Acknowledgement returned before the entry is persisted
#[derive(Debug, Serialize, ToSchema)]
pub struct RecordHistoryResponse {
    pub accepted: bool,
}

/// History entry returned to the UI
#[derive(Debug, Serialize, ToSchema)]
pub struct HistoryEntryResponse {
    pub id: Uuid,
    pub user_id: String,
    pub title: String,
    pub content: String,
    #[schema(value_type = String, example = "question")]
    pub category: HistoryCategory,
    pub created_at: DateTime<Utc>,
}

impl From<HistoryEntry> for HistoryEntryResponse {
    fn from(entry: HistoryEntry) -> Self {
        Self {
            id: entry.id,
            user_id: entry.user_id,
            title: entry.title,
            content: entry.content,
            category: entry.category,
            created_at: entry.created_at,
        }
    }
}
