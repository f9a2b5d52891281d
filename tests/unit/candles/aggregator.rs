//! Unit tests for candle aggregation

use crate::fixtures::{candles_from_closes, FIFTEEN_MINUTES_MS, START_MS};
use wickping::candles::CandleAggregator;
use wickping::models::{Candle, Interval};
use wickping::Error;

fn hourly_window() -> Vec<Candle> {
    vec![
        Candle::new(START_MS, 100.0, 105.0, 99.0, 102.0, 10.0),
        Candle::new(START_MS + FIFTEEN_MINUTES_MS, 102.0, 108.0, 101.0, 107.0, 20.0),
        Candle::new(START_MS + 2 * FIFTEEN_MINUTES_MS, 107.0, 107.5, 95.0, 96.0, 30.0),
        Candle::new(START_MS + 3 * FIFTEEN_MINUTES_MS, 96.0, 100.0, 96.0, 98.0, 40.0),
    ]
}

#[test]
fn test_aggregate_hourly_window() {
    let hourly = CandleAggregator::aggregate(&hourly_window(), "1h").unwrap();
    assert_eq!(hourly.len(), 1);

    let candle = hourly[0];
    assert_eq!(candle.timestamp, START_MS);
    assert_eq!(candle.open, 100.0);
    assert_eq!(candle.high, 108.0);
    assert_eq!(candle.low, 95.0);
    assert_eq!(candle.close, 98.0);
    assert_eq!(candle.volume, 100.0);
}

#[test]
fn test_aggregate_15m_is_identity() {
    let candles = hourly_window();
    let result = CandleAggregator::aggregate(&candles, "15m").unwrap();
    assert_eq!(result, candles);
}

#[test]
fn test_aggregate_drops_trailing_remainder() {
    let candles = candles_from_closes(&[1.0, 2.0, 3.0, 4.0, 5.0]);

    let half_hour = CandleAggregator::aggregate(&candles, "30m").unwrap();
    assert_eq!(half_hour.len(), 2);
    assert_eq!(half_hour[0].close, 2.0);
    assert_eq!(half_hour[1].close, 4.0);

    let hourly = CandleAggregator::aggregate(&candles, "1h").unwrap();
    assert_eq!(hourly.len(), 1);
    assert_eq!(hourly[0].close, 4.0);
}

#[test]
fn test_aggregate_group_counts() {
    let candles = candles_from_closes(&vec![100.0; 200]);
    let expected = [("15m", 200), ("30m", 100), ("1h", 50), ("4h", 12), ("1d", 2)];
    for (target, count) in expected {
        let result = CandleAggregator::aggregate(&candles, target).unwrap();
        assert_eq!(result.len(), count, "target {}", target);
    }
}

#[test]
fn test_aggregate_fewer_than_one_group() {
    let candles = candles_from_closes(&vec![100.0; 95]);
    assert!(CandleAggregator::aggregate(&candles, "1d").unwrap().is_empty());
    assert!(CandleAggregator::aggregate(&[], "4h").unwrap().is_empty());
}

#[test]
fn test_aggregate_window_timestamps_step_by_interval() {
    let candles = candles_from_closes(&vec![100.0; 32]);
    let four_hour = CandleAggregator::aggregate_to(&candles, Interval::H4);
    assert_eq!(four_hour.len(), 2);
    assert_eq!(
        four_hour[1].timestamp - four_hour[0].timestamp,
        Interval::H4.duration().num_milliseconds()
    );
}

#[test]
fn test_aggregate_unsupported_interval() {
    let candles = hourly_window();
    for target in ["2h", "5m", "1w", ""] {
        let err = CandleAggregator::aggregate(&candles, target).unwrap_err();
        assert!(
            matches!(err, Error::UnsupportedInterval(ref t) if t == target),
            "target {:?} gave {:?}",
            target,
            err
        );
    }
}
