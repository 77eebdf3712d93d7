// HTTP routes: thin decode -> engine -> encode handlers

mod http;

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::AppConfig;
use crate::engine::TieredQueryEngine;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) engine: Arc<TieredQueryEngine>,
    pub(crate) config: AppConfig,
}

pub fn app(engine: Arc<TieredQueryEngine>, config: AppConfig) -> Router {
    let state = AppState { engine, config };
    Router::new()
        .route("/", get(|| async { "fleetpulse metrics API" })) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/servers/{id}/metrics", get(http::metrics_handler))
        .route("/api/servers/{id}/trend", get(http::trend_handler))
        .route("/api/servers/{id}/compare", get(http::compare_handler))
        .route("/api/servers/{id}/dashboard", get(http::dashboard_handler))
        .route("/api/servers/{id}/heatmap", get(http::heatmap_handler))
        .route("/api/storage/summary", get(http::storage_summary_handler))
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
