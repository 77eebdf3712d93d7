// Dashboard composition: current reading + 24h series + trend + heatmap.
// Current reading and the 24h window are required; the heatmap is best-effort.

use tracing::{instrument, warn};

use crate::models::{DashboardView, Granularity};

use super::{EngineError, TieredQueryEngine, analytics};

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

impl TieredQueryEngine {
    /// One denormalized view for a server dashboard. Fails with NoCurrentData
    /// when the 1-minute tier has nothing for the server; a heatmap failure
    /// degrades to an empty list instead of failing the whole call.
    #[instrument(skip(self), fields(operation = "build_dashboard"))]
    pub async fn build_dashboard(&self, server_id: &str) -> Result<DashboardView, EngineError> {
        let current = self
            .store()
            .latest(Granularity::OneMinute, server_id)
            .await
            .map_err(|e| EngineError::store(server_id, e))?
            .ok_or_else(|| EngineError::NoCurrentData {
                server_id: server_id.to_string(),
            })?;

        let end_ms = chrono::Utc::now().timestamp_millis();
        let start_ms = end_ms - MS_PER_DAY;

        // 24h at auto-resolved granularity (10-minute tier for a day's span).
        let window = self.query(server_id, start_ms, end_ms, None).await?;
        let trends = analytics::trend(&window.points);

        let heatmap = match self.heatmap(server_id, start_ms, end_ms).await {
            Ok(points) => points,
            Err(e) => {
                warn!(server_id, error = %e, "heatmap fetch failed, dashboard renders without it");
                Vec::new()
            }
        };

        Ok(DashboardView {
            server_id: server_id.to_string(),
            current,
            granularity: window.granularity,
            points_24h: window.points,
            trends,
            heatmap,
            last_updated: end_ms,
        })
    }
}
