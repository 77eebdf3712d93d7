// Tiered query result envelope.

use serde::{Deserialize, Serialize};

use super::{Granularity, RollupPoint};

/// Substitution notice when the requested range was empty and recent data
/// was returned instead.
pub const MSG_SHOWING_AVAILABLE: &str = "Showing available data (requested period had no data)";

/// Notice when the server has no rollup rows to return at all.
pub const MSG_NO_DATA: &str = "No data found in specified range";

/// Points for one server over one range at one resolved tier.
/// `message` is set only when data outside the requested range was
/// substituted, or when no data exists at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TieredQueryResult {
    pub server_id: String,
    pub start: i64,
    pub end: i64,
    pub granularity: Granularity,
    pub points: Vec<RollupPoint>,
    pub total_points: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
