// Resolution tiers and the range -> tier policy.

use serde::{Deserialize, Serialize};

const MS_PER_HOUR: i64 = 60 * 60 * 1000;

/// One of the four precomputed rollup resolutions. Wire form is "1m" / "5m" / "10m" / "1h".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Granularity {
    #[serde(rename = "1m")]
    OneMinute,
    #[serde(rename = "5m")]
    FiveMinutes,
    #[serde(rename = "10m")]
    TenMinutes,
    #[serde(rename = "1h")]
    OneHour,
}

/// Unknown granularity string; the four known tiers are the only valid values.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown granularity '{0}' (expected 1m, 5m, 10m or 1h)")]
pub struct InvalidGranularity(pub String);

impl Granularity {
    /// All tiers, finest first.
    pub const ALL: [Granularity; 4] = [
        Granularity::OneMinute,
        Granularity::FiveMinutes,
        Granularity::TenMinutes,
        Granularity::OneHour,
    ];

    /// Picks the coarsest tier that keeps a window UI-renderable (~60-180 points).
    /// Boundaries are inclusive toward the finer tier: exactly 1h still resolves to 1m.
    pub fn for_range(start_ms: i64, end_ms: i64) -> Self {
        let duration = end_ms - start_ms;
        if duration <= MS_PER_HOUR {
            Granularity::OneMinute
        } else if duration <= 3 * MS_PER_HOUR {
            Granularity::FiveMinutes
        } else if duration <= 24 * MS_PER_HOUR {
            Granularity::TenMinutes
        } else {
            Granularity::OneHour
        }
    }

    /// Bucket width of this tier in milliseconds.
    pub fn bucket_ms(self) -> i64 {
        match self {
            Granularity::OneMinute => 60_000,
            Granularity::FiveMinutes => 300_000,
            Granularity::TenMinutes => 600_000,
            Granularity::OneHour => 3_600_000,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Granularity::OneMinute => "1m",
            Granularity::FiveMinutes => "5m",
            Granularity::TenMinutes => "10m",
            Granularity::OneHour => "1h",
        }
    }
}

impl std::str::FromStr for Granularity {
    type Err = InvalidGranularity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1m" => Ok(Granularity::OneMinute),
            "5m" => Ok(Granularity::FiveMinutes),
            "10m" => Ok(Granularity::TenMinutes),
            "1h" => Ok(Granularity::OneHour),
            other => Err(InvalidGranularity(other.to_string())),
        }
    }
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
