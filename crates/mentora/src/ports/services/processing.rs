//! Remote Processing Port
//!
//! Abstract interface for the per-document remote processing function.
//! The wire shapes match what the upstream function host expects.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Request sent to the remote processing function
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingRequest {
    /// Storage key of the uploaded blob
    pub file_path: String,
    /// Display title (original file name)
    pub title: String,
    pub user_id: String,
    /// Processing instruction supplied with the batch
    pub prompt: String,
}

/// Response expected from the remote processing function
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingResponse {
    pub result: String,
}

/// Invokes the remote processing function for one uploaded document
#[async_trait]
pub trait ProcessingFunction: Send + Sync {
    /// Returns the processed text, or an error for this document only
    async fn process(&self, request: &ProcessingRequest) -> Result<String, DomainError>;
}
