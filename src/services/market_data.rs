//! Market data provider interface used by the evaluation runner.

use crate::cache::RedisCache;
use crate::error::Result;
use crate::models::candle::{Candle, Interval};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Cached candles for `symbol` at `interval`, oldest to newest. An empty
    /// series means nothing is cached yet.
    async fn get_candles(&self, symbol: &str, interval: Interval) -> Result<Vec<Candle>>;
}

/// Reads series written to Redis by the candle caching job.
pub struct CachedMarketDataProvider {
    cache: Arc<RedisCache>,
}

impl CachedMarketDataProvider {
    pub fn new(cache: Arc<RedisCache>) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl MarketDataProvider for CachedMarketDataProvider {
    async fn get_candles(&self, symbol: &str, interval: Interval) -> Result<Vec<Candle>> {
        let Some(cached) = self.cache.get_candles(symbol, interval).await? else {
            debug!(symbol = %symbol, interval = %interval, "CachedMarketDataProvider: cache miss");
            return Ok(Vec::new());
        };

        if cached.is_stale(interval, Utc::now()) {
            // Stale data is still evaluated; the caching job is what lags.
            warn!(
                symbol = %symbol,
                interval = %interval,
                cached_at = %cached.cached_at,
                "CachedMarketDataProvider: cached candles for {} {} are past their TTL",
                symbol,
                interval
            );
        }
        Ok(cached.candles)
    }
}

/// Fixed in-memory series, for tests and offline runs
#[derive(Debug, Clone, Default)]
pub struct StaticMarketData {
    series: HashMap<(String, Interval), Vec<Candle>>,
}

impl StaticMarketData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_candles(mut self, symbol: &str, interval: Interval, candles: Vec<Candle>) -> Self {
        self.series
            .insert((symbol.trim().to_ascii_uppercase(), interval), candles);
        self
    }
}

#[async_trait]
impl MarketDataProvider for StaticMarketData {
    async fn get_candles(&self, symbol: &str, interval: Interval) -> Result<Vec<Candle>> {
        Ok(self
            .series
            .get(&(symbol.trim().to_ascii_uppercase(), interval))
            .cloned()
            .unwrap_or_default())
    }
}
