//! Server Configuration
//!
//! Built once from the Shuttle secret store and passed to each component at
//! construction. Required secrets fail startup with a named-field error;
//! there are no embedded fallback credentials.

use anyhow::{anyhow, Result};
use shuttle_runtime::SecretStore;

/// Bucket receiving uploaded course documents when none is configured
const DEFAULT_STORAGE_BUCKET: &str = "course-documents";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the upstream function host (no trailing slash)
    pub upstream_base_url: String,
    /// Anonymous API key sent as `apikey` to the upstream
    pub upstream_anon_key: String,
    /// Storage bucket for uploaded documents
    pub storage_bucket: String,
    /// Provider credentials; a missing key degrades that provider to
    /// unavailable instead of failing startup
    pub openrouter_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
}

impl AppConfig {
    pub fn from_secrets(secrets: &SecretStore) -> Result<Self> {
        Ok(Self {
            upstream_base_url: require(secrets, "UPSTREAM_BASE_URL")?
                .trim_end_matches('/')
                .to_string(),
            upstream_anon_key: require(secrets, "UPSTREAM_ANON_KEY")?,
            storage_bucket: secrets
                .get("STORAGE_BUCKET")
                .unwrap_or_else(|| DEFAULT_STORAGE_BUCKET.to_string()),
            openrouter_api_key: secrets.get("OPENROUTER_API_KEY"),
            gemini_api_key: secrets.get("GEMINI_API_KEY"),
        })
    }
}

fn require(secrets: &SecretStore, key: &str) -> Result<String> {
    secrets
        .get(key)
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| anyhow!("Missing required secret: {}", key))
}
