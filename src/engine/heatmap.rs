// Heatmap projection: tier points reduced to the visualization field subset.

use crate::models::HeatmapPoint;

use super::{EngineError, TieredQueryEngine};

impl TieredQueryEngine {
    /// Points over the range at the auto-resolved tier, projected to
    /// HeatmapPoint. Field selection only; no further computation.
    pub async fn heatmap(
        &self,
        server_id: &str,
        start_ms: i64,
        end_ms: i64,
    ) -> Result<Vec<HeatmapPoint>, EngineError> {
        let result = self.query(server_id, start_ms, end_ms, None).await?;
        Ok(result.points.iter().map(HeatmapPoint::from).collect())
    }
}
