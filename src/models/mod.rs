// Domain models for the tiered metrics query engine

mod analytics;
mod dashboard;
mod granularity;
mod query;
mod rollup;
mod stats;

pub use analytics::{ComparisonResult, MetricAverages, MetricChanges, PeriodSummary};
pub use dashboard::DashboardView;
pub use granularity::{Granularity, InvalidGranularity};
pub use query::{MSG_NO_DATA, MSG_SHOWING_AVAILABLE, TieredQueryResult};
pub use rollup::{HeatmapPoint, RollupPoint};
pub use stats::{StorageSummary, TierStats};
