//! Document Batch - Uploads and Per-File Outcomes
//!
//! Types for one invocation of the processing pipeline: the files submitted
//! together, the per-file outcome of each independent job, and the ordered
//! reduction of all outcomes into a single artifact.

use serde::{Deserialize, Serialize};

/// Ceiling on the aggregate size of one batch (20 MB)
pub const MAX_TOTAL_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Declared content types accepted for processing
pub const ALLOWED_CONTENT_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.ms-powerpoint",
    "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    "text/plain",
];

/// One uploaded file awaiting upload and remote processing
#[derive(Debug, Clone)]
pub struct DocumentFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl DocumentFile {
    pub fn is_allowed_type(&self) -> bool {
        ALLOWED_CONTENT_TYPES.contains(&self.content_type.as_str())
    }

    /// Owner-scoped storage key: `{owner}/{epoch_millis}_{sanitized_name}`.
    /// The timestamp component keeps repeat submissions of the same file
    /// from colliding.
    pub fn storage_key(&self, owner_id: &str, epoch_millis: i64) -> String {
        format!(
            "{}/{}_{}",
            owner_id,
            epoch_millis,
            sanitize_file_name(&self.name)
        )
    }
}

/// Replaces any character outside `[A-Za-z0-9._-]` with `_`
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Outcome of one file's job; `text` is always populated with either the
/// processed content or a human-readable failure explanation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadOutcome {
    pub source_file_name: String,
    pub succeeded: bool,
    pub text: String,
}

impl UploadOutcome {
    pub fn success(source_file_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source_file_name: source_file_name.into(),
            succeeded: true,
            text: text.into(),
        }
    }

    pub fn failure(source_file_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source_file_name: source_file_name.into(),
            succeeded: false,
            text: text.into(),
        }
    }
}

/// All outcomes of a batch, reduced in original input order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinedResult {
    /// Outcome texts joined with a paragraph separator, input order
    pub combined_text: String,
    /// Raw per-file outcomes for programmatic consumers
    pub outcomes: Vec<UploadOutcome>,
}

impl CombinedResult {
    pub fn from_outcomes(outcomes: Vec<UploadOutcome>) -> Self {
        let combined_text = outcomes
            .iter()
            .map(|o| o.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        Self {
            combined_text,
            outcomes,
        }
    }
}
