//! Provider Status Aggregator
//!
//! Queries each configured AI provider's health/quota endpoint and folds the
//! heterogeneous responses into one schema. A provider failure becomes data
//! (`available: false` with a populated error), never an error from
//! `get_status` itself. The aggregator holds no state between calls;
//! caching belongs to the consumer.

use std::collections::BTreeMap;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::config::AppConfig;

const OPENROUTER_KEY_URL: &str = "https://openrouter.ai/api/v1/auth/key";
const GEMINI_MODELS_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Requests per day on the OpenRouter free tier
const OPENROUTER_FREE_DAILY_LIMIT: i64 = 50;
/// Requests per day with purchased credits
const OPENROUTER_PAID_DAILY_LIMIT: i64 = 1000;

/// Normalized status for one provider. Every field is always populated:
/// live responses are merged over a static per-provider fallback template.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProviderStatus {
    pub available: bool,
    pub credits_used: f64,
    /// None means the key has no spending cap
    pub credits_remaining: Option<f64>,
    pub rate_limit_remaining: i64,
    pub daily_limit: i64,
    pub error: Option<String>,
}

/// One entry per configured provider, always, even under total upstream
/// failure
pub type AggregatedStatus = BTreeMap<String, ProviderStatus>;

/// Aggregates provider health/quota into one response
pub struct StatusAggregator {
    client: Client,
    openrouter_api_key: Option<String>,
    gemini_api_key: Option<String>,
}

impl StatusAggregator {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            openrouter_api_key: config.openrouter_api_key.clone(),
            gemini_api_key: config.gemini_api_key.clone(),
        }
    }

    /// Query every configured provider concurrently. Never fails as a
    /// whole: each provider check converts its own failures into an
    /// unavailable status.
    pub async fn get_status(&self) -> AggregatedStatus {
        let (openrouter, gemini) = tokio::join!(self.check_openrouter(), self.check_gemini());

        let mut status = BTreeMap::new();
        status.insert("openrouter".to_string(), openrouter);
        status.insert("gemini".to_string(), gemini);
        status
    }

    async fn check_openrouter(&self) -> ProviderStatus {
        let Some(key) = self.openrouter_api_key.as_deref() else {
            return unavailable(openrouter_fallback(), "API key not configured");
        };

        let response = match self
            .client
            .get(OPENROUTER_KEY_URL)
            .bearer_auth(key)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("OpenRouter status check failed: {}", e);
                return unavailable(openrouter_fallback(), &format!("Request failed: {}", e));
            }
        };

        if !response.status().is_success() {
            return unavailable(
                openrouter_fallback(),
                &format!("Status endpoint returned {}", response.status()),
            );
        }

        match response.json::<Value>().await {
            Ok(body) => normalize_openrouter(&body),
            Err(e) => unavailable(
                openrouter_fallback(),
                &format!("Malformed status body: {}", e),
            ),
        }
    }

    /// Gemini exposes no quota endpoint; an authenticated model listing
    /// serves as the health probe and quota fields come from the template.
    async fn check_gemini(&self) -> ProviderStatus {
        let Some(key) = self.gemini_api_key.as_deref() else {
            return unavailable(gemini_fallback(), "API key not configured");
        };

        let url = format!("{}?key={}&pageSize=1", GEMINI_MODELS_URL, key);
        match self.client.get(&url).send().await {
            Ok(response) if response.status().is_success() => ProviderStatus {
                available: true,
                ..gemini_fallback()
            },
            Ok(response) => unavailable(
                gemini_fallback(),
                &format!("Health probe returned {}", response.status()),
            ),
            Err(e) => {
                tracing::warn!("Gemini status check failed: {}", e);
                unavailable(gemini_fallback(), &format!("Request failed: {}", e))
            }
        }
    }
}

/// Static template for OpenRouter; live fields are merged over this
fn openrouter_fallback() -> ProviderStatus {
    ProviderStatus {
        available: false,
        credits_used: 0.0,
        credits_remaining: None,
        rate_limit_remaining: 0,
        daily_limit: OPENROUTER_FREE_DAILY_LIMIT,
        error: None,
    }
}

/// Static template for Gemini carrying the documented free-tier limits
fn gemini_fallback() -> ProviderStatus {
    ProviderStatus {
        available: false,
        credits_used: 0.0,
        credits_remaining: None,
        rate_limit_remaining: 15,
        daily_limit: 1500,
        error: None,
    }
}

fn unavailable(template: ProviderStatus, error: &str) -> ProviderStatus {
    ProviderStatus {
        available: false,
        error: Some(error.to_string()),
        ..template
    }
}

/// Merge the live `auth/key` payload over the fallback template so the
/// caller always receives every expected field
fn normalize_openrouter(body: &Value) -> ProviderStatus {
    let mut status = openrouter_fallback();
    status.available = true;

    let data = body.get("data").unwrap_or(body);

    if let Some(usage) = data.get("usage").and_then(Value::as_f64) {
        status.credits_used = usage;
    }
    if let Some(limit) = data.get("limit").and_then(Value::as_f64) {
        status.credits_remaining = Some((limit - status.credits_used).max(0.0));
    }
    if let Some(requests) = data
        .get("rate_limit")
        .and_then(|r| r.get("requests"))
        .and_then(Value::as_i64)
    {
        status.rate_limit_remaining = requests;
    }
    if let Some(is_free_tier) = data.get("is_free_tier").and_then(Value::as_bool) {
        status.daily_limit = if is_free_tier {
            OPENROUTER_FREE_DAILY_LIMIT
        } else {
            OPENROUTER_PAID_DAILY_LIMIT
        };
    }

    status
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::config::AppConfig;

    fn aggregator_without_keys() -> StatusAggregator {
        StatusAggregator::new(&AppConfig {
            upstream_base_url: "https://functions.example.edu".to_string(),
            upstream_anon_key: "anon-key".to_string(),
            storage_bucket: "course-documents".to_string(),
            openrouter_api_key: None,
            gemini_api_key: None,
        })
    }

    #[tokio::test]
    async fn test_missing_credentials_reports_every_provider_unavailable() {
        let status = aggregator_without_keys().get_status().await;

        assert_eq!(status.len(), 2);
        for provider in ["openrouter", "gemini"] {
            let entry = status.get(provider).unwrap();
            assert!(!entry.available);
            assert!(entry.error.as_deref().unwrap().contains("not configured"));
        }
    }

    #[test]
    fn test_normalize_full_openrouter_body() {
        let body = json!({
            "data": {
                "usage": 1.25,
                "limit": 10.0,
                "is_free_tier": false,
                "rate_limit": { "requests": 40, "interval": "10s" }
            }
        });

        let status = normalize_openrouter(&body);
        assert!(status.available);
        assert_eq!(status.credits_used, 1.25);
        assert_eq!(status.credits_remaining, Some(8.75));
        assert_eq!(status.rate_limit_remaining, 40);
        assert_eq!(status.daily_limit, OPENROUTER_PAID_DAILY_LIMIT);
        assert!(status.error.is_none());
    }

    #[test]
    fn test_normalize_partial_body_keeps_template_fields() {
        let body = json!({ "data": { "usage": 0.5 } });

        let status = normalize_openrouter(&body);
        assert!(status.available);
        assert_eq!(status.credits_used, 0.5);
        // Fields absent from the response fall back to the template
        assert_eq!(status.credits_remaining, None);
        assert_eq!(status.rate_limit_remaining, 0);
        assert_eq!(status.daily_limit, OPENROUTER_FREE_DAILY_LIMIT);
    }

    #[test]
    fn test_normalize_unexpected_shape_still_populates_all_fields() {
        let status = normalize_openrouter(&json!("not an object"));
        assert!(status.available);
        assert_eq!(status.credits_used, 0.0);
        assert_eq!(status.credits_remaining, None);
    }

    #[test]
    fn test_credits_remaining_never_negative() {
        let body = json!({ "data": { "usage": 12.0, "limit": 10.0 } });
        let status = normalize_openrouter(&body);
        assert_eq!(status.credits_remaining, Some(0.0));
    }
}
