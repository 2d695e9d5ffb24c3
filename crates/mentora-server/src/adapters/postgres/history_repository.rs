//! PostgreSQL implementation of HistoryRepository

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use mentora::{DomainError, HistoryEntry, HistoryRepository};

/// PostgreSQL implementation of HistoryRepository
pub struct PgHistoryRepository {
    pool: PgPool,
}

impl PgHistoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct HistoryEntryRow {
    id: Uuid,
    user_id: String,
    title: String,
    content: String,
    category: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<HistoryEntryRow> for HistoryEntry {
    fn from(row: HistoryEntryRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            content: row.content,
            category: row.category.parse().unwrap_or_default(),
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl HistoryRepository for PgHistoryRepository {
    async fn save(&self, entry: &HistoryEntry) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO history_entries (id, user_id, title, content, category, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(entry.id)
        .bind(&entry.user_id)
        .bind(&entry.title)
        .bind(&entry.content)
        .bind(entry.category.to_string())
        .bind(entry.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(())
    }

    async fn find_by_user(
        &self,
        user_id: &str,
        limit: i64,
    ) -> Result<Vec<HistoryEntry>, DomainError> {
        let rows = sqlx::query_as::<_, HistoryEntryRow>(
            "SELECT * FROM history_entries WHERE user_id = $1 ORDER BY created_at DESC LIMIT $2",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(rows.into_iter().map(HistoryEntry::from).collect())
    }
}
