// Tier query gateway: resolve a tier, count-check, fetch capped ascending
// rows, apply the empty-range fallback policy. Analytics, dashboard, heatmap
// and stats operations live in the submodules and build on query().

pub mod analytics;
mod dashboard;
mod error;
mod heatmap;
mod stats;

pub use error::EngineError;

use std::sync::Arc;

use tracing::instrument;

use crate::models::{Granularity, MSG_NO_DATA, MSG_SHOWING_AVAILABLE, RollupPoint, TieredQueryResult};
use crate::rollup_store::TierReader;

/// Gateway knobs, passed at construction so tests can exercise cap and
/// fallback edges against a small store.
#[derive(Debug, Clone)]
pub struct QueryConfig {
    /// Hard cap on rows per query; the oldest rows win when it bites.
    pub row_cap: u32,
    /// Substitute recent data when the requested range is empty.
    pub fallback_enabled: bool,
    /// Most recent rows returned by the fallback.
    pub fallback_limit: u32,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            row_cap: 10_000,
            fallback_enabled: true,
            fallback_limit: 100,
        }
    }
}

pub struct TieredQueryEngine {
    store: Arc<dyn TierReader>,
    config: QueryConfig,
}

impl TieredQueryEngine {
    pub fn new(store: Arc<dyn TierReader>, config: QueryConfig) -> Self {
        Self { store, config }
    }

    pub(crate) fn store(&self) -> &dyn TierReader {
        self.store.as_ref()
    }

    /// Points for `server_id` over [start_ms, end_ms], at `granularity` or the
    /// tier resolved from the range. An unbounded range cannot produce an
    /// unbounded response: rows are capped at `row_cap`, oldest first.
    ///
    /// A range with no rows falls back to the most recent available rows for
    /// the server (when enabled), flagged via `message`. A server with no rows
    /// at all is a success with zero points, not an error.
    #[instrument(skip(self), fields(operation = "tiered_query"))]
    pub async fn query(
        &self,
        server_id: &str,
        start_ms: i64,
        end_ms: i64,
        granularity: Option<Granularity>,
    ) -> Result<TieredQueryResult, EngineError> {
        let tier = granularity.unwrap_or_else(|| Granularity::for_range(start_ms, end_ms));

        // Degenerate range: zero points, and no fallback. The fallback exists
        // to rescue plausible windows with no data, not inverted inputs.
        if end_ms <= start_ms {
            return Ok(Self::result(
                server_id,
                start_ms,
                end_ms,
                tier,
                Vec::new(),
                Some(MSG_NO_DATA.into()),
            ));
        }

        let count = self
            .store
            .count_in_range(tier, server_id, start_ms, end_ms)
            .await
            .map_err(|e| EngineError::store(server_id, e))?;

        if count == 0 {
            if self.config.fallback_enabled {
                let points = self
                    .store
                    .recent_tier(tier, server_id, self.config.fallback_limit)
                    .await
                    .map_err(|e| EngineError::store(server_id, e))?;
                if !points.is_empty() {
                    return Ok(Self::result(
                        server_id,
                        start_ms,
                        end_ms,
                        tier,
                        points,
                        Some(MSG_SHOWING_AVAILABLE.into()),
                    ));
                }
            }
            return Ok(Self::result(
                server_id,
                start_ms,
                end_ms,
                tier,
                Vec::new(),
                Some(MSG_NO_DATA.into()),
            ));
        }

        let points = self
            .store
            .query_tier(tier, server_id, start_ms, end_ms, self.config.row_cap)
            .await
            .map_err(|e| EngineError::store(server_id, e))?;
        Ok(Self::result(server_id, start_ms, end_ms, tier, points, None))
    }

    fn result(
        server_id: &str,
        start: i64,
        end: i64,
        granularity: Granularity,
        points: Vec<RollupPoint>,
        message: Option<String>,
    ) -> TieredQueryResult {
        TieredQueryResult {
            server_id: server_id.to_string(),
            start,
            end,
            granularity,
            total_points: points.len(),
            points,
            message,
        }
    }
}
