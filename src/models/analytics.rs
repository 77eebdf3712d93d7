// Flattened averages and percentage deltas over rollup point series.

use serde::{Deserialize, Serialize};

use super::Granularity;

/// One flattened average per metric type over a point collection
/// (average of each point's avg field, not re-derived from raw samples).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricAverages {
    pub cpu: f64,
    pub memory: f64,
    pub disk: f64,
    pub network: f64,
    pub temperature: f64,
    pub load: f64,
}

/// Per-metric percentage deltas between two MetricAverages. A zero baseline
/// reports 0 rather than an infinite increase; callers that need to tell
/// "newly appeared" from "unchanged" inspect the baseline itself.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricChanges {
    pub cpu: f64,
    pub memory: f64,
    pub disk: f64,
    pub network: f64,
    pub temperature: f64,
    pub load: f64,
}

/// Averages and resolved granularity for one side of a two-period comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSummary {
    pub start: i64,
    pub end: i64,
    pub granularity: Granularity,
    pub points_count: usize,
    pub averages: MetricAverages,
}

/// Percentage change between two independently resolved periods. The two
/// granularities may differ (e.g. 5-minute data against 1-hour data); callers
/// render the comparison honestly from the per-period summaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub server_id: String,
    pub period1: PeriodSummary,
    pub period2: PeriodSummary,
    pub changes: MetricChanges,
}
