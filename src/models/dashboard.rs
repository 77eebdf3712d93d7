// Denormalized dashboard view: current reading + 24h series + trend + heatmap.

use serde::{Deserialize, Serialize};

use super::{Granularity, HeatmapPoint, MetricChanges, RollupPoint};

/// Everything a server dashboard renders in one response. `current` comes from
/// the 1-minute tier; `points_24h` and `heatmap` cover the trailing 24 hours at
/// the auto-resolved granularity. An empty `heatmap` means that fetch degraded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub server_id: String,
    pub current: RollupPoint,
    pub granularity: Granularity,
    pub points_24h: Vec<RollupPoint>,
    pub trends: MetricChanges,
    pub heatmap: Vec<HeatmapPoint>,
    pub last_updated: i64,
}
