// Trend and comparison math over point series.
// Pure slice helpers first; the engine operations that feed them follow.

use crate::models::{ComparisonResult, MetricAverages, MetricChanges, PeriodSummary, RollupPoint};

use super::{EngineError, TieredQueryEngine};

/// Average of each point's avg field per metric. Empty input averages to zero.
pub fn metric_averages(points: &[RollupPoint]) -> MetricAverages {
    if points.is_empty() {
        return MetricAverages::default();
    }
    let n = points.len() as f64;
    MetricAverages {
        cpu: points.iter().map(|p| p.cpu_avg).sum::<f64>() / n,
        memory: points.iter().map(|p| p.memory_avg).sum::<f64>() / n,
        disk: points.iter().map(|p| p.disk_avg).sum::<f64>() / n,
        network: points.iter().map(|p| p.network_avg).sum::<f64>() / n,
        temperature: points.iter().map(|p| p.temperature_avg).sum::<f64>() / n,
        load: points.iter().map(|p| p.load_avg).sum::<f64>() / n,
    }
}

/// Percentage change with a zero-baseline policy: old == 0 reports 0, never
/// NaN or infinity.
pub fn percent_change(old: f64, new: f64) -> f64 {
    if old == 0.0 {
        0.0
    } else {
        (new - old) / old * 100.0
    }
}

pub fn changes_between(old: &MetricAverages, new: &MetricAverages) -> MetricChanges {
    MetricChanges {
        cpu: percent_change(old.cpu, new.cpu),
        memory: percent_change(old.memory, new.memory),
        disk: percent_change(old.disk, new.disk),
        network: percent_change(old.network, new.network),
        temperature: percent_change(old.temperature, new.temperature),
        load: percent_change(old.load, new.load),
    }
}

/// Quartile trend: first len/4 points against last len/4 points, each quarter
/// sized by integer division. Under 4 points both quarters are empty and the
/// trend is all-zero.
pub fn trend(points: &[RollupPoint]) -> MetricChanges {
    let quarter = points.len() / 4;
    if quarter == 0 {
        return MetricChanges::default();
    }
    let first = metric_averages(&points[..quarter]);
    let last = metric_averages(&points[points.len() - quarter..]);
    changes_between(&first, &last)
}

impl TieredQueryEngine {
    /// Trend over the points of one range at its resolved tier.
    pub async fn trend_for_range(
        &self,
        server_id: &str,
        start_ms: i64,
        end_ms: i64,
    ) -> Result<MetricChanges, EngineError> {
        let result = self.query(server_id, start_ms, end_ms, None).await?;
        Ok(trend(&result.points))
    }

    /// Two-period comparison. Each period resolves its own granularity, so the
    /// result carries both tiers alongside the deltas.
    pub async fn compare(
        &self,
        server_id: &str,
        start1_ms: i64,
        end1_ms: i64,
        start2_ms: i64,
        end2_ms: i64,
    ) -> Result<ComparisonResult, EngineError> {
        let r1 = self.query(server_id, start1_ms, end1_ms, None).await?;
        let r2 = self.query(server_id, start2_ms, end2_ms, None).await?;

        let averages1 = metric_averages(&r1.points);
        let averages2 = metric_averages(&r2.points);

        Ok(ComparisonResult {
            server_id: server_id.to_string(),
            changes: changes_between(&averages1, &averages2),
            period1: PeriodSummary {
                start: start1_ms,
                end: end1_ms,
                granularity: r1.granularity,
                points_count: r1.points.len(),
                averages: averages1,
            },
            period2: PeriodSummary {
                start: start2_ms,
                end: end2_ms,
                granularity: r2.granularity,
                points_count: r2.points.len(),
                averages: averages2,
            },
        })
    }
}
