//! HistoryEntry - Recorded Interaction
//!
//! One completed interaction (query + answer + optional context) owned by
//! a user identity. Entries are created once and never mutated; deletion
//! policy lives outside this core.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::HistoryCategory;

/// Queries longer than this get a truncated title
const TITLE_MAX_CHARS: usize = 50;
/// Visible characters kept before the ellipsis marker
const TITLE_TRUNCATED_CHARS: usize = 47;

/// A recorded interaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub user_id: String,
    /// Derived from the query, bounded to 50 visible characters
    pub title: String,
    /// Labeled sections: the literal query, the answer, optional context
    pub content: String,
    pub category: HistoryCategory,
    pub created_at: DateTime<Utc>,
}

impl HistoryEntry {
    /// Builds an entry from a completed interaction.
    pub fn from_interaction(
        user_id: impl Into<String>,
        query: &str,
        answer: &str,
        category: HistoryCategory,
        metadata: Option<&str>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            title: derive_title(query),
            content: compose_content(query, answer, metadata),
            category,
            created_at: Utc::now(),
        }
    }
}

/// Full query when short enough, otherwise the first 47 characters plus an
/// ellipsis marker. Counts characters, not bytes.
fn derive_title(query: &str) -> String {
    if query.chars().count() > TITLE_MAX_CHARS {
        let head: String = query.chars().take(TITLE_TRUNCATED_CHARS).collect();
        format!("{}...", head)
    } else {
        query.to_string()
    }
}

fn compose_content(query: &str, answer: &str, metadata: Option<&str>) -> String {
    let mut content = format!("Q: {}\n\nA: {}", query, answer);

    if let Some(extra) = metadata.filter(|m| !m.trim().is_empty()) {
        content.push_str("\n\nContext: ");
        content.push_str(extra);
    }

    content
}
