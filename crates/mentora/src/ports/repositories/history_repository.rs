//! History Repository Port
//!
//! Abstract interface for interaction-history persistence.

use async_trait::async_trait;

use crate::domain::entities::HistoryEntry;
use crate::domain::errors::DomainError;

/// Repository interface for history entries
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Persist a completed interaction
    async fn save(&self, entry: &HistoryEntry) -> Result<(), DomainError>;

    /// Most recent entries for a user, newest first
    async fn find_by_user(
        &self,
        user_id: &str,
        limit: i64,
    ) -> Result<Vec<HistoryEntry>, DomainError>;
}
