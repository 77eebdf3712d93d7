// Per-tier storage statistics and the merged summary.

use serde::{Deserialize, Serialize};

use super::Granularity;

/// Record counts and coverage for one rollup tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierStats {
    pub granularity: Granularity,
    pub total_records: i64,
    pub unique_servers: i64,
    pub earliest_record: Option<i64>,
    pub latest_record: Option<i64>,
    pub storage_size: i64,
}

/// Merge of the four tier stats. Records sum across tiers; unique servers take
/// the max, since tiers overlap in server coverage rather than partition it.
/// `tiers_missing` lists tiers whose stats query failed and were omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageSummary {
    pub total_records: i64,
    pub unique_servers: i64,
    pub tiers: Vec<TierStats>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub tiers_missing: Vec<Granularity>,
}
