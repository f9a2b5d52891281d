//! Redis-backed candle cache (read side)
//!
//! The caching job stores each `(symbol, interval)` series under
//! `{prefix}:{SYMBOL}:{interval}` as JSON `{ "timestamp": <cached at>, "candles": [...] }`.

use crate::error::Result;
use crate::models::candle::{Candle, Interval};
use chrono::{DateTime, Utc};
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PREFIX: &str = "candles";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedCandles {
    #[serde(rename = "timestamp")]
    pub cached_at: DateTime<Utc>,
    #[serde(default)]
    pub candles: Vec<Candle>,
}

impl CachedCandles {
    /// Past the TTL the caching job gives this interval
    pub fn is_stale(&self, interval: Interval, now: DateTime<Utc>) -> bool {
        now - self.cached_at > interval.cache_ttl()
    }
}

pub fn candle_key(prefix: &str, symbol: &str, interval: Interval) -> String {
    format!("{}:{}:{}", prefix, symbol.trim().to_ascii_uppercase(), interval)
}

pub struct RedisCache {
    manager: ConnectionManager,
    prefix: String,
}

impl RedisCache {
    pub async fn new(redis_url: &str, prefix: impl Into<String>) -> Result<Self> {
        let client = redis::Client::open(redis_url)?;
        let manager = ConnectionManager::new(client).await?;
        Ok(Self {
            manager,
            prefix: prefix.into(),
        })
    }

    pub async fn get_candles(
        &self,
        symbol: &str,
        interval: Interval,
    ) -> Result<Option<CachedCandles>> {
        let key = candle_key(&self.prefix, symbol, interval);
        let mut conn = self.manager.clone();
        let raw: Option<String> = conn.get(&key).await?;
        match raw {
            Some(payload) => Ok(Some(serde_json::from_str(&payload)?)),
            None => Ok(None),
        }
    }
}
