//! Unit tests for the candle cache payload

use chrono::{Duration, TimeZone, Utc};
use wickping::cache::{candle_key, CachedCandles};
use wickping::models::Interval;

#[test]
fn test_candle_key_layout() {
    assert_eq!(candle_key("candles", "btcusdt", Interval::M15), "candles:BTCUSDT:15m");
    assert_eq!(candle_key("market", " ETHUSDT", Interval::D1), "market:ETHUSDT:1d");
}

#[test]
fn test_cached_payload_parses_mixed_candle_formats() {
    let raw = r#"{
        "timestamp": "2024-01-01T10:00:00Z",
        "candles": [
            {"timestamp": 1704103200000, "open": "1", "high": "2", "low": "0.5",
             "close": "1.5", "volume": "10"},
            [1704104100000, "1.5", "2.5", "1.0", "2.0", "12"]
        ]
    }"#;
    let cached: CachedCandles = serde_json::from_str(raw).unwrap();
    assert_eq!(cached.candles.len(), 2);
    assert_eq!(cached.candles[1].close, 2.0);
    assert_eq!(cached.cached_at, Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap());
}

#[test]
fn test_staleness_follows_interval_ttl() {
    let cached_at = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
    let cached = CachedCandles {
        cached_at,
        candles: Vec::new(),
    };

    assert!(!cached.is_stale(Interval::M15, cached_at + Duration::minutes(15)));
    assert!(cached.is_stale(Interval::M15, cached_at + Duration::minutes(16)));
    assert!(!cached.is_stale(Interval::H4, cached_at + Duration::hours(3)));
    assert!(cached.is_stale(Interval::M30, cached_at + Duration::minutes(31)));
}
