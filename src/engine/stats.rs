// Storage summary: per-tier stats merged with sum(records) / max(servers).

use tracing::{instrument, warn};

use crate::models::{Granularity, StorageSummary};

use super::TieredQueryEngine;

impl TieredQueryEngine {
    /// Stats for all four tiers. A tier whose query fails is logged and listed
    /// in `tiers_missing` rather than failing the summary. Unique servers
    /// merge by max: tiers overlap in server coverage, summing would
    /// double-count.
    #[instrument(skip(self), fields(operation = "summarize"))]
    pub async fn summarize(&self) -> StorageSummary {
        let mut tiers = Vec::with_capacity(Granularity::ALL.len());
        let mut tiers_missing = Vec::new();

        for tier in Granularity::ALL {
            match self.store().tier_stats(tier).await {
                Ok(stats) => tiers.push(stats),
                Err(e) => {
                    warn!(tier = %tier, error = %e, "tier stats unavailable, omitting from summary");
                    tiers_missing.push(tier);
                }
            }
        }

        StorageSummary {
            total_records: tiers.iter().map(|t| t.total_records).sum(),
            unique_servers: tiers.iter().map(|t| t.unique_servers).max().unwrap_or(0),
            tiers,
            tiers_missing,
        }
    }
}
