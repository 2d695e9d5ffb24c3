//! HTTP Blob Storage Adapter
//!
//! Uploads document blobs to the upstream storage REST API under
//! owner-scoped keys.

use async_trait::async_trait;
use reqwest::Client;

use mentora::{BlobStorage, DomainError};

use crate::config::AppConfig;

/// Blob storage backed by the upstream host's storage REST endpoint
pub struct HttpBlobStorage {
    client: Client,
    base_url: String,
    anon_key: String,
    bucket: String,
}

impl HttpBlobStorage {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.upstream_base_url.clone(),
            anon_key: config.upstream_anon_key.clone(),
            bucket: config.storage_bucket.clone(),
        }
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.base_url, self.bucket, key)
    }
}

#[async_trait]
impl BlobStorage for HttpBlobStorage {
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), DomainError> {
        let response = self
            .client
            .post(self.object_url(key))
            .header("Authorization", format!("Bearer {}", self.anon_key))
            .header("apikey", &self.anon_key)
            .header("Content-Type", content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|e| DomainError::Transport(format!("Storage upload failed: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!("Uploaded blob {}", key);
            Ok(())
        } else {
            let detail = response
                .text()
                .await
                .unwrap_or_else(|_| "No response body".to_string());
            Err(DomainError::Upstream {
                status: status.as_u16(),
                detail,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_url_is_bucket_scoped() {
        let storage = HttpBlobStorage::new(&AppConfig {
            upstream_base_url: "https://functions.example.edu".to_string(),
            upstream_anon_key: "anon-key".to_string(),
            storage_bucket: "course-documents".to_string(),
            openrouter_api_key: None,
            gemini_api_key: None,
        });

        assert_eq!(
            storage.object_url("user-1/1700000000000_notes.pdf"),
            "https://functions.example.edu/storage/v1/object/course-documents/user-1/1700000000000_notes.pdf"
        );
    }
}
