// GET handlers. Parameter parsing, the caller-facing window limit, and
// status-code mapping live here; everything else is the engine's.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use serde::Deserialize;

use super::AppState;
use crate::engine::EngineError;
use crate::models::Granularity;
use crate::version::{NAME, VERSION};

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

type ApiError = (StatusCode, axum::Json<serde_json::Value>);

fn error_body(status: StatusCode, message: String) -> ApiError {
    (status, axum::Json(serde_json::json!({ "error": message })))
}

fn engine_error(e: EngineError) -> ApiError {
    match &e {
        EngineError::InvalidGranularity(_) => error_body(StatusCode::BAD_REQUEST, e.to_string()),
        EngineError::NoCurrentData { .. } => error_body(StatusCode::NOT_FOUND, e.to_string()),
        EngineError::Store { .. } => {
            tracing::error!(error = %e, "engine query failed");
            error_body(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// Rejects windows wider than query.max_window_days before the core runs.
fn check_window(state: &AppState, start: i64, end: i64) -> Result<(), ApiError> {
    let max_ms = state.config.query.max_window_days as i64 * MS_PER_DAY;
    if end - start > max_ms {
        return Err(error_body(
            StatusCode::BAD_REQUEST,
            format!(
                "time range exceeds {} days",
                state.config.query.max_window_days
            ),
        ));
    }
    Ok(())
}

fn parse_granularity(raw: Option<&str>) -> Result<Option<Granularity>, ApiError> {
    raw.map(str::parse::<Granularity>)
        .transpose()
        .map_err(|e| engine_error(EngineError::from(e)))
}

/// GET /version — returns service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}

#[derive(Debug, Deserialize)]
pub(super) struct MetricsParams {
    start: i64,
    end: i64,
    granularity: Option<String>,
}

/// GET /api/servers/{id}/metrics?start&end[&granularity]
pub(super) async fn metrics_handler(
    State(state): State<AppState>,
    Path(server_id): Path<String>,
    Query(params): Query<MetricsParams>,
) -> Result<impl IntoResponse, ApiError> {
    check_window(&state, params.start, params.end)?;
    let granularity = parse_granularity(params.granularity.as_deref())?;
    let result = state
        .engine
        .query(&server_id, params.start, params.end, granularity)
        .await
        .map_err(engine_error)?;
    Ok(axum::Json(result))
}

#[derive(Debug, Deserialize)]
pub(super) struct RangeParams {
    start: i64,
    end: i64,
}

/// GET /api/servers/{id}/trend?start&end
pub(super) async fn trend_handler(
    State(state): State<AppState>,
    Path(server_id): Path<String>,
    Query(params): Query<RangeParams>,
) -> Result<impl IntoResponse, ApiError> {
    check_window(&state, params.start, params.end)?;
    let changes = state
        .engine
        .trend_for_range(&server_id, params.start, params.end)
        .await
        .map_err(engine_error)?;
    Ok(axum::Json(changes))
}

#[derive(Debug, Deserialize)]
pub(super) struct CompareParams {
    start1: i64,
    end1: i64,
    start2: i64,
    end2: i64,
}

/// GET /api/servers/{id}/compare?start1&end1&start2&end2
pub(super) async fn compare_handler(
    State(state): State<AppState>,
    Path(server_id): Path<String>,
    Query(params): Query<CompareParams>,
) -> Result<impl IntoResponse, ApiError> {
    check_window(&state, params.start1, params.end1)?;
    check_window(&state, params.start2, params.end2)?;
    let result = state
        .engine
        .compare(
            &server_id,
            params.start1,
            params.end1,
            params.start2,
            params.end2,
        )
        .await
        .map_err(engine_error)?;
    Ok(axum::Json(result))
}

/// GET /api/servers/{id}/dashboard
pub(super) async fn dashboard_handler(
    State(state): State<AppState>,
    Path(server_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let view = state
        .engine
        .build_dashboard(&server_id)
        .await
        .map_err(engine_error)?;
    Ok(axum::Json(view))
}

/// GET /api/servers/{id}/heatmap?start&end
pub(super) async fn heatmap_handler(
    State(state): State<AppState>,
    Path(server_id): Path<String>,
    Query(params): Query<RangeParams>,
) -> Result<impl IntoResponse, ApiError> {
    check_window(&state, params.start, params.end)?;
    let points = state
        .engine
        .heatmap(&server_id, params.start, params.end)
        .await
        .map_err(engine_error)?;
    Ok(axum::Json(points))
}

/// GET /api/storage/summary
pub(super) async fn storage_summary_handler(State(state): State<AppState>) -> impl IntoResponse {
    axum::Json(state.engine.summarize().await)
}
