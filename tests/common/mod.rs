// Shared test helpers

use fleetpulse::models::{Granularity, RollupPoint};
use fleetpulse::rollup_store::RollupStore;
use tempfile::TempDir;

/// Rollup point with a given cpu average; other metrics fixed so tests can
/// assert on cpu without noise.
pub fn point(timestamp: i64, cpu: f64) -> RollupPoint {
    RollupPoint {
        timestamp,
        cpu_avg: cpu,
        cpu_max: cpu + 5.0,
        cpu_min: (cpu - 5.0).max(0.0),
        memory_avg: 50.0,
        memory_max: 60.0,
        memory_min: 40.0,
        disk_avg: 70.0,
        disk_max: 75.0,
        network_avg: 1000.0,
        network_max: 2000.0,
        temperature_avg: 45.0,
        temperature_max: 50.0,
        load_avg: 1.5,
        load_max: 2.0,
        sample_count: 60,
    }
}

pub async fn test_store(dir: &TempDir) -> RollupStore {
    let path = dir.path().join("rollups.db");
    let store = RollupStore::connect(path.to_str().unwrap(), 2)
        .await
        .unwrap();
    store.init().await.unwrap();
    store
}

/// Seed one tier with points starting at `start_ts`, one bucket apart, with
/// the given cpu averages.
pub async fn seed_series(
    store: &RollupStore,
    tier: Granularity,
    server_id: &str,
    start_ts: i64,
    cpus: &[f64],
) {
    for (i, cpu) in cpus.iter().enumerate() {
        let ts = start_ts + (i as i64) * tier.bucket_ms();
        store.save_point(tier, server_id, &point(ts, *cpu)).await.unwrap();
    }
}
