//! Folds 15-minute base candles into higher-timeframe candles

use crate::error::Result;
use crate::models::candle::{Candle, Interval};

pub struct CandleAggregator;

impl CandleAggregator {
    /// Aggregate base candles (oldest to newest) into `target` ("30m", "1h", ...).
    ///
    /// Fails with `UnsupportedInterval` for any target outside 15m/30m/1h/4h/1d.
    pub fn aggregate(candles: &[Candle], target: &str) -> Result<Vec<Candle>> {
        let interval: Interval = target.parse()?;
        Ok(Self::aggregate_to(candles, interval))
    }

    /// Windows start at index 0 and never overlap. A trailing remainder shorter
    /// than the group size is dropped, so the newest output candle can lag the
    /// input by up to `group_size - 1` base candles.
    pub fn aggregate_to(candles: &[Candle], interval: Interval) -> Vec<Candle> {
        candles
            .chunks_exact(interval.group_size())
            .filter_map(Self::fold_window)
            .collect()
    }

    fn fold_window(window: &[Candle]) -> Option<Candle> {
        let first = window.first()?;
        let last = window.last()?;

        let high = window.iter().map(|c| c.high).fold(f64::NEG_INFINITY, f64::max);
        let low = window.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);
        let volume = window.iter().map(|c| c.volume).sum();

        Some(Candle::new(
            first.timestamp,
            first.open,
            high,
            low,
            last.close,
            volume,
        ))
    }
}
