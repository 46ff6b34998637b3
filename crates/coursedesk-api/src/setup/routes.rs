//! Route configuration and setup

use crate::api_doc::ApiDoc;
use crate::constants::{API_PREFIX, OPENAPI_PATH, UPLOADS_PATH};
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Json, Router,
};
use coursedesk_core::Config;
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

/// Setup all application routes
pub async fn setup_routes(
    config: &Config,
    state: Arc<AppState>,
) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;

    let http_concurrency_limit = config.http_concurrency_limit().max(1);
    tracing::info!(
        http_concurrency_limit = http_concurrency_limit,
        max_upload_bytes = config.max_upload_size_bytes(),
        json_body_limit_bytes = config.json_body_limit_bytes(),
        "HTTP limits configured"
    );

    let app = upload_routes(config)
        .merge(json_routes(config))
        .merge(info_routes())
        .route(OPENAPI_PATH, get(|| async { Json(ApiDoc::openapi()) }))
        .merge(utoipa_rapidoc::RapiDoc::new(OPENAPI_PATH).path("/docs"))
        .fallback_service(static_frontend(config))
        .layer(ConcurrencyLimitLayer::new(http_concurrency_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

/// Multipart intake and raw file retrieval
fn upload_routes(config: &Config) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/upload", API_PREFIX),
            post(handlers::upload::upload_curriculum)
                .layer(DefaultBodyLimit::max(config.max_upload_size_bytes())),
        )
        .route(
            &format!("{}/{{filename}}", UPLOADS_PATH),
            get(handlers::uploads::get_upload),
        )
}

/// Endpoints taking a JSON body
fn json_routes(config: &Config) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/feedback", API_PREFIX),
            post(handlers::feedback::submit_feedback),
        )
        .route(&format!("{}/chat", API_PREFIX), post(handlers::chat::chat))
        .layer(DefaultBodyLimit::max(config.json_body_limit_bytes()))
}

fn info_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/analytics", API_PREFIX),
            get(handlers::analytics::get_analytics),
        )
        .route(
            &format!("{}/health", API_PREFIX),
            get(handlers::health::health_check),
        )
        .route(
            &format!("{}/trends", API_PREFIX),
            get(handlers::trends::get_trends),
        )
}

/// Static frontend; unknown paths get `index.html` so client-side routing works.
fn static_frontend(config: &Config) -> ServeDir<ServeFile> {
    let public_dir = config.public_dir();
    ServeDir::new(public_dir).fallback(ServeFile::new(public_dir.join("index.html")))
}

/// Setup CORS configuration
fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins().iter().any(|o| o == "*") {
        tracing::debug!("CORS allows all origins");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins()
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .map_err(|e| anyhow::anyhow!("Invalid CORS origin '{}': {}", o, e))
            })
            .collect::<Result<Vec<_>, _>>()?;

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    };
    Ok(cors)
}
