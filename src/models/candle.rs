//! OHLCV candles and the timeframes they are bucketed into

use crate::error::Error;
use crate::utils::serde::{f64_from_string, i64_from_string, value_as_f64, value_as_i64};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Resolution collected from the market-data source.
pub const BASE_INTERVAL: Interval = Interval::M15;

/// One price bar. `timestamp` is the bucket open time in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCandle")]
pub struct Candle {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    pub fn opened_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }
}

/// Accepted wire shapes: an object, or an exchange kline row
/// `[openTime, open, high, low, close, volume, ...]` with decimal strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawCandle {
    Object(CandleObject),
    Kline(Vec<Value>),
}

#[derive(Deserialize)]
struct CandleObject {
    #[serde(deserialize_with = "i64_from_string")]
    timestamp: i64,
    #[serde(deserialize_with = "f64_from_string")]
    open: f64,
    #[serde(deserialize_with = "f64_from_string")]
    high: f64,
    #[serde(deserialize_with = "f64_from_string")]
    low: f64,
    #[serde(deserialize_with = "f64_from_string")]
    close: f64,
    #[serde(deserialize_with = "f64_from_string")]
    volume: f64,
}

impl TryFrom<RawCandle> for Candle {
    type Error = String;

    fn try_from(raw: RawCandle) -> Result<Self, Self::Error> {
        match raw {
            RawCandle::Object(o) => Ok(Candle::new(
                o.timestamp,
                o.open,
                o.high,
                o.low,
                o.close,
                o.volume,
            )),
            RawCandle::Kline(row) => {
                if row.len() < 6 {
                    return Err(format!("kline row has {} fields, expected at least 6", row.len()));
                }
                let timestamp = value_as_i64(&row[0]).ok_or("kline open time is not an integer")?;
                let field = |i: usize, name: &str| {
                    value_as_f64(&row[i]).ok_or_else(|| format!("kline {} is not numeric", name))
                };
                Ok(Candle::new(
                    timestamp,
                    field(1, "open")?,
                    field(2, "high")?,
                    field(3, "low")?,
                    field(4, "close")?,
                    field(5, "volume")?,
                ))
            }
        }
    }
}

/// Timeframes an alert condition can be evaluated on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Interval {
    M15,
    M30,
    H1,
    H4,
    D1,
}

impl Interval {
    pub const ALL: [Interval; 5] = [
        Interval::M15,
        Interval::M30,
        Interval::H1,
        Interval::H4,
        Interval::D1,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::M15 => "15m",
            Interval::M30 => "30m",
            Interval::H1 => "1h",
            Interval::H4 => "4h",
            Interval::D1 => "1d",
        }
    }

    /// Number of 15-minute base candles folded into one candle of this interval
    pub fn group_size(&self) -> usize {
        match self {
            Interval::M15 => 1,
            Interval::M30 => 2,
            Interval::H1 => 4,
            Interval::H4 => 16,
            Interval::D1 => 96,
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::minutes(15 * self.group_size() as i64)
    }

    /// How long a cached series for this interval is considered fresh
    pub fn cache_ttl(&self) -> Duration {
        match self {
            Interval::M15 => Duration::minutes(15),
            Interval::H1 => Duration::hours(1),
            Interval::H4 => Duration::hours(4),
            Interval::D1 => Duration::days(1),
            _ => Duration::minutes(30),
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Interval::ALL
            .iter()
            .copied()
            .find(|interval| interval.as_str() == s.trim())
            .ok_or_else(|| Error::UnsupportedInterval(s.to_string()))
    }
}
