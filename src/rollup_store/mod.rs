// SQLite rollup tiers. One table per resolution; flat scalar columns indexed
// by (server_id, bucket_ts). The tables are materialized and kept fresh by the
// out-of-scope rollup maintenance process; the query engine only reads them.
// save_point exists for that process (and for seeding test stores).

use async_trait::async_trait;
use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use std::path::Path;
use std::str::FromStr;
use tracing::instrument;

use crate::models::{Granularity, RollupPoint, TierStats};

/// Estimated on-disk bytes per rollup row (14 REAL + 2 INTEGER columns, rowid,
/// server id text). SQLite only reports per-table sizes through the dbstat
/// vtab, which the bundled driver does not enable.
const ROW_BYTES_ESTIMATE: i64 = 160;

/// Read seam the query engine consumes. All point collections come back
/// ascending by bucket timestamp.
#[async_trait]
pub trait TierReader: Send + Sync {
    async fn query_tier(
        &self,
        tier: Granularity,
        server_id: &str,
        start_ms: i64,
        end_ms: i64,
        limit: u32,
    ) -> anyhow::Result<Vec<RollupPoint>>;

    /// Most recent rows for a server regardless of range, ascending.
    async fn recent_tier(
        &self,
        tier: Granularity,
        server_id: &str,
        limit: u32,
    ) -> anyhow::Result<Vec<RollupPoint>>;

    async fn latest(&self, tier: Granularity, server_id: &str)
    -> anyhow::Result<Option<RollupPoint>>;

    async fn count_in_range(
        &self,
        tier: Granularity,
        server_id: &str,
        start_ms: i64,
        end_ms: i64,
    ) -> anyhow::Result<i64>;

    async fn tier_stats(&self, tier: Granularity) -> anyhow::Result<TierStats>;
}

/// Tier -> table name mapping. Overridable so tests can point a tier at a
/// scratch table.
#[derive(Debug, Clone)]
pub struct TierTables {
    pub one_minute: String,
    pub five_minutes: String,
    pub ten_minutes: String,
    pub one_hour: String,
}

impl Default for TierTables {
    fn default() -> Self {
        Self {
            one_minute: "rollups_1m".into(),
            five_minutes: "rollups_5m".into(),
            ten_minutes: "rollups_10m".into(),
            one_hour: "rollups_1h".into(),
        }
    }
}

impl TierTables {
    pub fn table(&self, tier: Granularity) -> &str {
        match tier {
            Granularity::OneMinute => &self.one_minute,
            Granularity::FiveMinutes => &self.five_minutes,
            Granularity::TenMinutes => &self.ten_minutes,
            Granularity::OneHour => &self.one_hour,
        }
    }
}

const POINT_COLUMNS: &str = "bucket_ts, cpu_avg, cpu_max, cpu_min, \
     memory_avg, memory_max, memory_min, disk_avg, disk_max, \
     network_avg, network_max, temperature_avg, temperature_max, \
     load_avg, load_max, sample_count";

pub struct RollupStore {
    pool: SqlitePool,
    tables: TierTables,
}

impl RollupStore {
    /// Connect to SQLite at `path`, create parent dir and DB if missing, enable WAL + pragmas.
    pub async fn connect(path: &str, max_pool_size: u32) -> anyhow::Result<Self> {
        if let Some(parent) = Path::new(path).parent() {
            std::fs::create_dir_all(parent)?;
        }
        let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .busy_timeout(std::time::Duration::from_secs(5))
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_pool_size)
            .connect_with(opts)
            .await?;
        Ok(Self {
            pool,
            tables: TierTables::default(),
        })
    }

    /// Same as `connect` but with explicit table names (tests use scratch tables).
    pub async fn connect_with_tables(
        path: &str,
        max_pool_size: u32,
        tables: TierTables,
    ) -> anyhow::Result<Self> {
        let mut store = Self::connect(path, max_pool_size).await?;
        store.tables = tables;
        Ok(store)
    }

    /// Create the four tier tables and indexes if they don't exist. The
    /// maintenance process owns the schema; creating it here lets an empty
    /// store answer queries with empty results instead of missing-table errors.
    pub async fn init(&self) -> anyhow::Result<()> {
        for tier in Granularity::ALL {
            let table = self.tables.table(tier);
            sqlx::query(&format!(
                r#"
                CREATE TABLE IF NOT EXISTS {table} (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    server_id TEXT NOT NULL,
                    bucket_ts INTEGER NOT NULL,
                    cpu_avg REAL NOT NULL,
                    cpu_max REAL NOT NULL,
                    cpu_min REAL NOT NULL,
                    memory_avg REAL NOT NULL,
                    memory_max REAL NOT NULL,
                    memory_min REAL NOT NULL,
                    disk_avg REAL NOT NULL,
                    disk_max REAL NOT NULL,
                    network_avg REAL NOT NULL,
                    network_max REAL NOT NULL,
                    temperature_avg REAL NOT NULL,
                    temperature_max REAL NOT NULL,
                    load_avg REAL NOT NULL,
                    load_max REAL NOT NULL,
                    sample_count INTEGER NOT NULL
                )
                "#
            ))
            .execute(&self.pool)
            .await?;

            sqlx::query(&format!(
                "CREATE INDEX IF NOT EXISTS idx_{table}_server_bucket ON {table}(server_id, bucket_ts)"
            ))
            .execute(&self.pool)
            .await?;
        }
        Ok(())
    }

    /// Insert one rollup row. Used by the rollup maintenance process, not by
    /// the query engine.
    #[instrument(skip(self, point), fields(repo = "rollup", operation = "save_point", tier = %tier))]
    pub async fn save_point(
        &self,
        tier: Granularity,
        server_id: &str,
        point: &RollupPoint,
    ) -> anyhow::Result<()> {
        let table = self.tables.table(tier);
        sqlx::query(&format!(
            "INSERT INTO {table} (server_id, {POINT_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)"
        ))
        .bind(server_id)
        .bind(point.timestamp)
        .bind(point.cpu_avg)
        .bind(point.cpu_max)
        .bind(point.cpu_min)
        .bind(point.memory_avg)
        .bind(point.memory_max)
        .bind(point.memory_min)
        .bind(point.disk_avg)
        .bind(point.disk_max)
        .bind(point.network_avg)
        .bind(point.network_max)
        .bind(point.temperature_avg)
        .bind(point.temperature_max)
        .bind(point.load_avg)
        .bind(point.load_max)
        .bind(point.sample_count)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    fn parse_point_row(row: &SqliteRow) -> anyhow::Result<RollupPoint> {
        Ok(RollupPoint {
            timestamp: row.try_get("bucket_ts")?,
            cpu_avg: row.try_get("cpu_avg")?,
            cpu_max: row.try_get("cpu_max")?,
            cpu_min: row.try_get("cpu_min")?,
            memory_avg: row.try_get("memory_avg")?,
            memory_max: row.try_get("memory_max")?,
            memory_min: row.try_get("memory_min")?,
            disk_avg: row.try_get("disk_avg")?,
            disk_max: row.try_get("disk_max")?,
            network_avg: row.try_get("network_avg")?,
            network_max: row.try_get("network_max")?,
            temperature_avg: row.try_get("temperature_avg")?,
            temperature_max: row.try_get("temperature_max")?,
            load_avg: row.try_get("load_avg")?,
            load_max: row.try_get("load_max")?,
            sample_count: row.try_get("sample_count")?,
        })
    }
}

#[async_trait]
impl TierReader for RollupStore {
    /// Rows in [start_ms, end_ms] ascending by bucket. The LIMIT keeps the
    /// oldest rows when the range holds more than `limit`.
    #[instrument(skip(self), fields(repo = "rollup", operation = "query_tier", tier = %tier))]
    async fn query_tier(
        &self,
        tier: Granularity,
        server_id: &str,
        start_ms: i64,
        end_ms: i64,
        limit: u32,
    ) -> anyhow::Result<Vec<RollupPoint>> {
        let table = self.tables.table(tier);
        let rows = sqlx::query(&format!(
            "SELECT {POINT_COLUMNS} FROM {table} \
             WHERE server_id = $1 AND bucket_ts BETWEEN $2 AND $3 \
             ORDER BY bucket_ts ASC LIMIT $4"
        ))
        .bind(server_id)
        .bind(start_ms)
        .bind(end_ms)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(Self::parse_point_row(&row)?);
        }
        Ok(out)
    }

    #[instrument(skip(self), fields(repo = "rollup", operation = "recent_tier", tier = %tier))]
    async fn recent_tier(
        &self,
        tier: Granularity,
        server_id: &str,
        limit: u32,
    ) -> anyhow::Result<Vec<RollupPoint>> {
        let table = self.tables.table(tier);
        let rows = sqlx::query(&format!(
            "SELECT {POINT_COLUMNS} FROM {table} \
             WHERE server_id = $1 ORDER BY bucket_ts DESC LIMIT $2"
        ))
        .bind(server_id)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(Self::parse_point_row(&row)?);
        }
        out.reverse();
        Ok(out)
    }

    async fn latest(
        &self,
        tier: Granularity,
        server_id: &str,
    ) -> anyhow::Result<Option<RollupPoint>> {
        let table = self.tables.table(tier);
        let row = sqlx::query(&format!(
            "SELECT {POINT_COLUMNS} FROM {table} \
             WHERE server_id = $1 ORDER BY bucket_ts DESC LIMIT 1"
        ))
        .bind(server_id)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(Self::parse_point_row).transpose()
    }

    /// COUNT over the range; materially cheaper than a full row scan when the
    /// answer is zero.
    async fn count_in_range(
        &self,
        tier: Granularity,
        server_id: &str,
        start_ms: i64,
        end_ms: i64,
    ) -> anyhow::Result<i64> {
        let table = self.tables.table(tier);
        let count = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM {table} WHERE server_id = $1 AND bucket_ts BETWEEN $2 AND $3"
        ))
        .bind(server_id)
        .bind(start_ms)
        .bind(end_ms)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    #[instrument(skip(self), fields(repo = "rollup", operation = "tier_stats", tier = %tier))]
    async fn tier_stats(&self, tier: Granularity) -> anyhow::Result<TierStats> {
        let table = self.tables.table(tier);
        let row = sqlx::query(&format!(
            "SELECT COUNT(*) AS total_records, COUNT(DISTINCT server_id) AS unique_servers, \
                    MIN(bucket_ts) AS earliest_record, MAX(bucket_ts) AS latest_record \
             FROM {table}"
        ))
        .fetch_one(&self.pool)
        .await?;

        let total_records: i64 = row.try_get("total_records")?;
        Ok(TierStats {
            granularity: tier,
            total_records,
            unique_servers: row.try_get("unique_servers")?,
            earliest_record: row.try_get("earliest_record")?,
            latest_record: row.try_get("latest_record")?,
            storage_size: total_records * ROW_BYTES_ESTIMATE,
        })
    }
}
