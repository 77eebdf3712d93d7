// Integration tests: HTTP endpoints end to end over a seeded store

mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use common::{seed_series, test_store};
use fleetpulse::config::AppConfig;
use fleetpulse::engine::TieredQueryEngine;
use fleetpulse::models::Granularity;
use fleetpulse::routes;
use fleetpulse::rollup_store::RollupStore;
use std::sync::Arc;
use tempfile::TempDir;

const T0: i64 = 1_700_000_000_000;
const HOUR_MS: i64 = 60 * 60 * 1000;

const TEST_CONFIG: &str = r#"
[server]
port = 8081
host = "0.0.0.0"

[database]
path = "data/test.db"
max_pool_size = 2

[query]
row_cap = 10000
fallback_enabled = true
fallback_limit = 100
max_window_days = 30
"#;

async fn test_server(dir: &TempDir) -> (TestServer, Arc<RollupStore>) {
    let config = AppConfig::load_from_str(TEST_CONFIG).unwrap();
    let store = Arc::new(test_store(dir).await);
    let engine = Arc::new(TieredQueryEngine::new(
        store.clone(),
        config.query.to_query_config(),
    ));
    let app = routes::app(engine, config);
    (TestServer::new(app), store)
}

#[tokio::test]
async fn root_returns_banner() {
    let dir = TempDir::new().unwrap();
    let (server, _store) = test_server(&dir).await;
    let response = server.get("/").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().contains("fleetpulse"));
}

#[tokio::test]
async fn version_returns_name_and_version() {
    let dir = TempDir::new().unwrap();
    let (server, _store) = test_server(&dir).await;
    let response = server.get("/version").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["name"], "fleetpulse");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn metrics_endpoint_round_trip() {
    let dir = TempDir::new().unwrap();
    let (server, store) = test_server(&dir).await;
    seed_series(&store, Granularity::OneMinute, "srv-a", T0, &[10.0, 20.0, 30.0]).await;

    let response = server
        .get(&format!(
            "/api/servers/srv-a/metrics?start={}&end={}",
            T0,
            T0 + HOUR_MS
        ))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["serverId"], "srv-a");
    assert_eq!(body["granularity"], "1m");
    assert_eq!(body["totalPoints"], 3);
    assert_eq!(body["points"][0]["cpuAvg"], 10.0);
    assert!(body.get("message").is_none());
}

#[tokio::test]
async fn metrics_accepts_explicit_granularity() {
    let dir = TempDir::new().unwrap();
    let (server, store) = test_server(&dir).await;
    seed_series(&store, Granularity::OneHour, "srv-a", T0, &[10.0]).await;

    let response = server
        .get(&format!(
            "/api/servers/srv-a/metrics?start={}&end={}&granularity=1h",
            T0,
            T0 + HOUR_MS
        ))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["granularity"], "1h");
    assert_eq!(body["totalPoints"], 1);
}

#[tokio::test]
async fn metrics_rejects_unknown_granularity() {
    let dir = TempDir::new().unwrap();
    let (server, _store) = test_server(&dir).await;
    let response = server
        .get(&format!(
            "/api/servers/srv-a/metrics?start={}&end={}&granularity=2m",
            T0,
            T0 + HOUR_MS
        ))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("granularity"));
}

#[tokio::test]
async fn metrics_rejects_oversized_window() {
    let dir = TempDir::new().unwrap();
    let (server, _store) = test_server(&dir).await;
    let response = server
        .get(&format!(
            "/api/servers/srv-a/metrics?start={}&end={}",
            T0,
            T0 + 31 * 24 * HOUR_MS
        ))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("30 days"));
}

#[tokio::test]
async fn trend_endpoint_returns_changes() {
    let dir = TempDir::new().unwrap();
    let (server, store) = test_server(&dir).await;
    seed_series(
        &store,
        Granularity::OneMinute,
        "srv-a",
        T0,
        &[10.0, 20.0, 30.0, 40.0],
    )
    .await;

    let response = server
        .get(&format!(
            "/api/servers/srv-a/trend?start={}&end={}",
            T0,
            T0 + HOUR_MS
        ))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["cpu"], 300.0);
}

#[tokio::test]
async fn compare_endpoint_reports_both_periods() {
    let dir = TempDir::new().unwrap();
    let (server, store) = test_server(&dir).await;
    seed_series(&store, Granularity::OneMinute, "srv-a", T0, &[10.0, 20.0]).await;
    let t2 = T0 + 100 * HOUR_MS;
    seed_series(&store, Granularity::OneMinute, "srv-a", t2, &[30.0]).await;

    let response = server
        .get(&format!(
            "/api/servers/srv-a/compare?start1={}&end1={}&start2={}&end2={}",
            T0,
            T0 + HOUR_MS,
            t2,
            t2 + HOUR_MS
        ))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["period1"]["granularity"], "1m");
    assert_eq!(body["period2"]["granularity"], "1m");
    assert_eq!(body["changes"]["cpu"], 100.0);
}

#[tokio::test]
async fn dashboard_for_unknown_server_is_404() {
    let dir = TempDir::new().unwrap();
    let (server, _store) = test_server(&dir).await;
    let response = server.get("/api/servers/srv-none/dashboard").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("srv-none"));
}

#[tokio::test]
async fn heatmap_endpoint_projects_points() {
    let dir = TempDir::new().unwrap();
    let (server, store) = test_server(&dir).await;
    seed_series(&store, Granularity::OneMinute, "srv-a", T0, &[10.0, 20.0]).await;

    let response = server
        .get(&format!(
            "/api/servers/srv-a/heatmap?start={}&end={}",
            T0,
            T0 + HOUR_MS
        ))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body.as_array().unwrap().len(), 2);
    assert_eq!(body[0]["cpuAvg"], 10.0);
    assert!(body[0].get("cpuMin").is_none()); // projection drops min fields
}

#[tokio::test]
async fn storage_summary_reports_tier_totals() {
    let dir = TempDir::new().unwrap();
    let (server, store) = test_server(&dir).await;
    seed_series(&store, Granularity::OneMinute, "srv-a", T0, &[10.0, 20.0]).await;
    seed_series(&store, Granularity::OneHour, "srv-b", T0, &[30.0]).await;

    let response = server.get("/api/storage/summary").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["totalRecords"], 3);
    assert_eq!(body["uniqueServers"], 1);
    assert_eq!(body["tiers"].as_array().unwrap().len(), 4);
    assert!(body.get("tiersMissing").is_none()); // empty list is skipped
}
