//! Upstream Function Gateway
//!
//! Stateless transport wrapper around the upstream function host. Turns an
//! inbound client call into an outbound request to a named remote function,
//! normalizing headers and relaying status and body. Holds no session state
//! between calls.

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde_json::{json, Value};

use mentora::{DomainError, ProcessingFunction, ProcessingRequest, ProcessingResponse};

use crate::config::AppConfig;

/// Identifier sent upstream as X-Client-Info
const CLIENT_INFO: &str = "mentora-gateway";

/// Upstream function backing the per-document processing invocation
const PROCESS_FUNCTION: &str = "process-document";

/// Response relayed to the caller. The forward call itself never fails;
/// upstream and transport errors are folded into the status and body.
#[derive(Debug, Clone)]
pub struct GatewayResponse {
    pub status: u16,
    pub body: Value,
}

impl GatewayResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Client for named functions exposed by the upstream host
#[derive(Clone)]
pub struct FunctionGateway {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl FunctionGateway {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.upstream_base_url.clone(),
            anon_key: config.upstream_anon_key.clone(),
        }
    }

    fn function_url(&self, function_name: &str) -> String {
        format!("{}/functions/v1/{}", self.base_url, function_name)
    }

    /// Forward a call to the named upstream function.
    ///
    /// Upstream 2xx passes through with the same status and body. Non-2xx
    /// keeps the upstream status with `{error, details}`. A transport
    /// failure maps to 500 with `{error, message}`. No retries are
    /// performed; the caller owns retry policy.
    pub async fn forward(
        &self,
        function_name: &str,
        method: Method,
        authorization: Option<&str>,
        body: Option<Value>,
    ) -> GatewayResponse {
        let mut request = self
            .client
            .request(method.clone(), self.function_url(function_name))
            .header("Content-Type", "application/json")
            .header("apikey", &self.anon_key)
            .header("X-Client-Info", CLIENT_INFO);

        // User-scoped calls stay user-scoped upstream
        if let Some(auth) = authorization {
            request = request.header("Authorization", auth);
        }

        if request_carries_body(&method) {
            if let Some(body) = body {
                request = request.json(&body);
            }
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Gateway transport failure for {}: {}", function_name, e);
                return GatewayResponse {
                    status: 500,
                    body: json!({
                        "error": "Upstream request failed",
                        "message": e.to_string(),
                    }),
                };
            }
        };

        let status = response.status();
        if status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
            GatewayResponse {
                status: status.as_u16(),
                body,
            }
        } else {
            let details = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            tracing::warn!(
                "Upstream function {} returned {}: {}",
                function_name,
                status,
                details
            );
            GatewayResponse {
                status: status.as_u16(),
                body: json!({
                    "error": status.canonical_reason().unwrap_or("Upstream error"),
                    "details": details,
                }),
            }
        }
    }
}

/// GET and HEAD never carry a body even if one was supplied
fn request_carries_body(method: &Method) -> bool {
    !matches!(*method, Method::GET | Method::HEAD)
}

#[async_trait]
impl ProcessingFunction for FunctionGateway {
    async fn process(&self, request: &ProcessingRequest) -> Result<String, DomainError> {
        let payload =
            serde_json::to_value(request).map_err(|e| DomainError::Transport(e.to_string()))?;

        let response = self
            .forward(PROCESS_FUNCTION, Method::POST, None, Some(payload))
            .await;

        if !response.is_success() {
            return Err(DomainError::Upstream {
                status: response.status,
                detail: response.body.to_string(),
            });
        }

        let parsed: ProcessingResponse = serde_json::from_value(response.body)
            .map_err(|e| DomainError::Transport(format!("Malformed processing response: {}", e)))?;

        Ok(parsed.result)
    }
}
