//! Unit tests for environment configuration

use std::collections::HashMap;
use std::path::PathBuf;
use wickping::config::{EvaluationConfig, DEFAULT_CONCURRENCY, DEFAULT_EVAL_INTERVAL_SECONDS};
use wickping::Error;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| vars.get(key).cloned()
}

#[test]
fn test_config_defaults() {
    let config = EvaluationConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(config, EvaluationConfig::default());
    assert_eq!(config.interval_seconds, DEFAULT_EVAL_INTERVAL_SECONDS);
    assert_eq!(config.concurrency, DEFAULT_CONCURRENCY);
    assert_eq!(config.alerts_path, PathBuf::from("alerts.json"));
    assert_eq!(config.cache_prefix, "candles");
    assert!(config.cron.is_none());
}

#[test]
fn test_config_overrides() {
    let config = EvaluationConfig::from_lookup(lookup(&[
        ("EVAL_INTERVAL_SECONDS", "900"),
        ("EVAL_CRON", " 0 */5 * * * * "),
        ("WORKER_CONCURRENCY", "2"),
        ("ALERTS_PATH", "/etc/wickping/alerts.json"),
        ("CANDLE_CACHE_PREFIX", "market"),
    ]))
    .unwrap();
    assert_eq!(config.interval_seconds, 900);
    assert_eq!(config.cron.as_deref(), Some("0 */5 * * * *"));
    assert_eq!(config.concurrency, 2);
    assert_eq!(config.alerts_path, PathBuf::from("/etc/wickping/alerts.json"));
    assert_eq!(config.cache_prefix, "market");
}

#[test]
fn test_config_rejects_bad_values() {
    let zero_workers = EvaluationConfig::from_lookup(lookup(&[("WORKER_CONCURRENCY", "0")]));
    assert!(matches!(zero_workers, Err(Error::Config(_))));

    let not_a_number =
        EvaluationConfig::from_lookup(lookup(&[("EVAL_INTERVAL_SECONDS", "hourly")]));
    assert!(matches!(not_a_number, Err(Error::Config(_))));

    let disabled = EvaluationConfig::from_lookup(lookup(&[("EVAL_INTERVAL_SECONDS", "0")]));
    assert!(matches!(disabled, Err(Error::Config(_))));
}

#[test]
fn test_zero_interval_allowed_with_cron() {
    let config = EvaluationConfig::from_lookup(lookup(&[
        ("EVAL_INTERVAL_SECONDS", "0"),
        ("EVAL_CRON", "0 0 * * * *"),
    ]))
    .unwrap();
    assert_eq!(config.cron.as_deref(), Some("0 0 * * * *"));
}
