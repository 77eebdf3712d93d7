// Rollup bucket row and its heatmap projection.
// cpu/memory track avg/max/min; disk, network, temperature and load track avg/max.

use serde::{Deserialize, Serialize};

/// One pre-aggregated bucket as materialized by the rollup maintenance process.
/// `timestamp` is the bucket start (epoch ms); `sample_count` is the number of
/// raw samples folded into the bucket. Read-only for the query engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollupPoint {
    pub timestamp: i64,
    pub cpu_avg: f64,
    pub cpu_max: f64,
    pub cpu_min: f64,
    pub memory_avg: f64,
    pub memory_max: f64,
    pub memory_min: f64,
    pub disk_avg: f64,
    pub disk_max: f64,
    pub network_avg: f64,
    pub network_max: f64,
    pub temperature_avg: f64,
    pub temperature_max: f64,
    pub load_avg: f64,
    pub load_max: f64,
    pub sample_count: i64,
}

/// Lighter visualization-oriented projection of a RollupPoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapPoint {
    pub timestamp: i64,
    pub cpu_avg: f64,
    pub memory_avg: f64,
    pub disk_avg: f64,
    pub cpu_max: f64,
    pub memory_max: f64,
    pub disk_max: f64,
    pub sample_count: i64,
}

impl From<&RollupPoint> for HeatmapPoint {
    fn from(p: &RollupPoint) -> Self {
        HeatmapPoint {
            timestamp: p.timestamp,
            cpu_avg: p.cpu_avg,
            memory_avg: p.memory_avg,
            disk_avg: p.disk_avg,
            cpu_max: p.cpu_max,
            memory_max: p.memory_max,
            disk_max: p.disk_max,
            sample_count: p.sample_count,
        }
    }
}
