//! Blob Storage Port
//!
//! Abstract interface for the keyed blob storage collaborator. From this
//! core's perspective the store is append-only: uploads always target fresh
//! owner-scoped keys, so there is no overwrite contention.

use async_trait::async_trait;

use crate::domain::errors::DomainError;

/// Keyed blob storage interface
#[async_trait]
pub trait BlobStorage: Send + Sync {
    /// Store `bytes` under `key` with the given content type
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str)
        -> Result<(), DomainError>;
}
