use axum::{extract::FromRef, routing::get, Json, Router};
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod adapters;
mod config;
mod models;
mod routes;
mod services;

use adapters::{HttpBlobStorage, PgHistoryRepository};
use config::AppConfig;
use services::documents::DocumentPipeline;
use services::gateway::FunctionGateway;
use services::provider_status::StatusAggregator;
use services::recorder::HistoryRecorder;

/// Pipeline wired with the concrete storage and processing adapters
pub type AppDocumentPipeline = DocumentPipeline<HttpBlobStorage, FunctionGateway>;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<FunctionGateway>,
    pub status: Arc<StatusAggregator>,
    pub pipeline: Arc<AppDocumentPipeline>,
    pub recorder: HistoryRecorder,
    pub history_repo: Arc<PgHistoryRepository>,
}

// Allow handlers to extract just the service they need
impl FromRef<AppState> for Arc<FunctionGateway> {
    fn from_ref(state: &AppState) -> Self {
        state.gateway.clone()
    }
}

impl FromRef<AppState> for Arc<StatusAggregator> {
    fn from_ref(state: &AppState) -> Self {
        state.status.clone()
    }
}

#[derive(Serialize)]
struct HealthCheck {
    status: String,
    message: String,
    version: String,
}

async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        message: "Mentora API is running - ready to study".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[shuttle_runtime::main]
async fn main(
    #[shuttle_shared_db::Postgres] pool: PgPool,
    #[shuttle_runtime::Secrets] secrets: shuttle_runtime::SecretStore,
) -> shuttle_axum::ShuttleAxum {
    tracing::info!("🎓 Mentora API initializing...");

    // A missing required secret is a startup failure, never a silent
    // fallback to an embedded default
    let config = AppConfig::from_secrets(&secrets)?;

    // Run migrations
    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("✅ Database migrations completed");

    if config.openrouter_api_key.is_none() {
        tracing::warn!("⚠️  No OPENROUTER_API_KEY set - openrouter will report unavailable");
    }
    if config.gemini_api_key.is_none() {
        tracing::warn!("⚠️  No GEMINI_API_KEY set - gemini will report unavailable");
    }

    // Wire services and adapters
    let gateway = Arc::new(FunctionGateway::new(&config));
    let status = Arc::new(StatusAggregator::new(&config));
    let storage = Arc::new(HttpBlobStorage::new(&config));
    let pipeline = Arc::new(DocumentPipeline::new(storage, gateway.clone()));
    let history_repo = Arc::new(PgHistoryRepository::new(pool));
    let recorder = HistoryRecorder::start(history_repo.clone());

    tracing::info!("📝 History worker started");

    let state = AppState {
        gateway,
        status,
        pipeline,
        recorder,
        history_repo,
    };

    let api_routes = Router::new()
        .merge(routes::proxy::router())
        .merge(routes::status::router())
        .merge(routes::documents::router())
        .merge(routes::history::router());

    // OpenAPI documentation
    let openapi = routes::swagger::ApiDoc::openapi();

    // Build router with shared state
    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .route("/health", get(health_check))
        .merge(api_routes)
        .layer(CorsLayer::permissive())
        .with_state(state);

    tracing::info!("📚 Swagger UI: /swagger-ui");
    tracing::info!("✅ Mentora API ready");

    Ok(router.into())
}
