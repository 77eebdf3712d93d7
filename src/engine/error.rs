use crate::models::InvalidGranularity;

/// Fatal outcomes of an engine operation. Empty results are not errors: a
/// server with no data yields a successful result carrying a message.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The rollup store call failed; surfaced unchanged, never retried here.
    #[error("rollup store query failed for server {server_id}: {source}")]
    Store {
        server_id: String,
        #[source]
        source: anyhow::Error,
    },

    #[error(transparent)]
    InvalidGranularity(#[from] InvalidGranularity),

    /// The 1-minute tier holds no row for this server; a dashboard without a
    /// current reading is not useful.
    #[error("no current metrics for server {server_id}")]
    NoCurrentData { server_id: String },
}

impl EngineError {
    pub(crate) fn store(server_id: &str, source: anyhow::Error) -> Self {
        EngineError::Store {
            server_id: server_id.to_string(),
            source,
        }
    }
}
