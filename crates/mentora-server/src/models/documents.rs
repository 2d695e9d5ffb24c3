//! Document Pipeline DTOs

use serde::Serialize;
use utoipa::ToSchema;

use mentora::{CombinedResult, UploadOutcome};

/// Per-file outcome within a batch
#[derive(Debug, Serialize, ToSchema)]
pub struct UploadOutcomeResponse {
    pub source_file_name: String,
    pub succeeded: bool,
    /// Processed content, or a failure explanation naming the file
    pub text: String,
}

impl From<UploadOutcome> for UploadOutcomeResponse {
    fn from(outcome: UploadOutcome) -> Self {
        Self {
            source_file_name: outcome.source_file_name,
            succeeded: outcome.succeeded,
            text: outcome.text,
        }
    }
}

/// Combined result of a document batch
#[derive(Debug, Serialize, ToSchema)]
pub struct ProcessDocumentsResponse {
    /// Outcome texts joined in input order
    pub result: String,
    pub outcomes: Vec<UploadOutcomeResponse>,
}

impl From<CombinedResult> for ProcessDocumentsResponse {
    fn from(combined: CombinedResult) -> Self {
        Self {
            result: combined.combined_text,
            outcomes: combined
                .outcomes
                .into_iter()
                .map(UploadOutcomeResponse::from)
                .collect(),
        }
    }
}
