//! Proxy Routes - Upstream Function Gateway
//!
//! Relays any-method calls on a dynamic function path to the upstream
//! function host. Every response, including error and preflight responses,
//! carries permissive CORS headers so the browser can consume it either
//! way.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Json, Router,
};
use serde_json::{json, Value};

use crate::services::gateway::FunctionGateway;
use crate::AppState;

const ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
const ALLOW_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

/// Forward a client call to a named upstream function
#[utoipa::path(
    post,
    path = "/proxy/{function}",
    params(
        ("function" = String, Path, description = "Upstream function name")
    ),
    responses(
        (status = 200, description = "Upstream response relayed unchanged"),
        (status = 400, description = "Function path missing"),
        (status = 500, description = "Upstream unreachable")
    ),
    tag = "Proxy"
)]
pub async fn forward_function(
    State(gateway): State<Arc<FunctionGateway>>,
    method: Method,
    function: Option<Path<String>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    // Preflight never contacts the upstream
    if method == Method::OPTIONS {
        return with_cors(StatusCode::OK.into_response());
    }

    let function_name = function.map(|Path(name)| name).unwrap_or_default();
    if function_name.trim_matches('/').is_empty() {
        return with_cors(
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Function path is required" })),
            )
                .into_response(),
        );
    }

    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let upstream = gateway
        .forward(&function_name, method, authorization, parse_body(&body))
        .await;

    let status = StatusCode::from_u16(upstream.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    with_cors((status, Json(upstream.body)).into_response())
}

/// The inbound body is opaque: forwarded as JSON when it parses, as a
/// string value otherwise
fn parse_body(body: &Bytes) -> Option<Value> {
    if body.is_empty() {
        return None;
    }
    serde_json::from_slice(body)
        .ok()
        .or_else(|| Some(Value::String(String::from_utf8_lossy(body).into_owned())))
}

/// Permissive CORS headers on every proxy response
fn with_cors(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
    response
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/proxy", any(forward_function))
        .route("/proxy/*function", any(forward_function))
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    use crate::config::AppConfig;

    /// Router over a gateway pointed at an address that would refuse every
    /// connection; the tests below must succeed without any outbound call
    fn test_router() -> Router {
        let gateway = Arc::new(FunctionGateway::new(&AppConfig {
            upstream_base_url: "http://127.0.0.1:9".to_string(),
            upstream_anon_key: "anon-key".to_string(),
            storage_bucket: "course-documents".to_string(),
            openrouter_api_key: None,
            gemini_api_key: None,
        }));

        Router::new()
            .route("/proxy", any(forward_function))
            .route("/proxy/*function", any(forward_function))
            .with_state(gateway)
    }

    #[tokio::test]
    async fn test_options_short_circuits_with_cors_headers() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/proxy/ask-tutor")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        for name in [
            "access-control-allow-origin",
            "access-control-allow-methods",
            "access-control-allow-headers",
        ] {
            assert!(response.headers().contains_key(name), "missing {}", name);
        }

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_missing_function_name_is_a_client_error() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/proxy")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"], "Function path is required");
    }

    #[test]
    fn test_parse_body_handles_json_and_opaque_payloads() {
        assert_eq!(parse_body(&Bytes::new()), None);
        assert_eq!(
            parse_body(&Bytes::from_static(b"{\"q\":\"hi\"}")),
            Some(json!({ "q": "hi" }))
        );
        assert_eq!(
            parse_body(&Bytes::from_static(b"plain text")),
            Some(Value::String("plain text".to_string()))
        );
    }
}
