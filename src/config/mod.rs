//! Environment-driven configuration

use crate::cache::DEFAULT_PREFIX;
use crate::error::{Error, Result};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_EVAL_INTERVAL_SECONDS: u64 = 3600;
pub const DEFAULT_CONCURRENCY: usize = 8;

/// `APP_ENV`, e.g. "production" or "sandbox"
pub fn get_environment() -> String {
    env::var("APP_ENV").unwrap_or_else(|_| "sandbox".to_string())
}

pub fn get_redis_url() -> String {
    env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379/".to_string())
}

/// Settings for evaluation batches
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationConfig {
    pub interval_seconds: u64,
    /// Explicit 6-field cron expression; overrides `interval_seconds`
    pub cron: Option<String>,
    /// Upper bound on alerts evaluated at once
    pub concurrency: usize,
    pub alerts_path: PathBuf,
    pub cache_prefix: String,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            interval_seconds: DEFAULT_EVAL_INTERVAL_SECONDS,
            cron: None,
            concurrency: DEFAULT_CONCURRENCY,
            alerts_path: PathBuf::from("alerts.json"),
            cache_prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}

impl EvaluationConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let interval_seconds =
            parse_or(&lookup, "EVAL_INTERVAL_SECONDS", defaults.interval_seconds)?;
        let concurrency = parse_or(&lookup, "WORKER_CONCURRENCY", defaults.concurrency)?;
        if concurrency == 0 {
            return Err(Error::Config("WORKER_CONCURRENCY must be > 0".to_string()));
        }

        let cron = lookup("EVAL_CRON")
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        if cron.is_none() && interval_seconds == 0 {
            return Err(Error::Config(
                "EVAL_INTERVAL_SECONDS must be > 0 when EVAL_CRON is not set".to_string(),
            ));
        }

        Ok(Self {
            interval_seconds,
            cron,
            concurrency,
            alerts_path: lookup("ALERTS_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.alerts_path),
            cache_prefix: lookup("CANDLE_CACHE_PREFIX").unwrap_or(defaults.cache_prefix),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| Error::Config(format!("{} is not a valid number: '{}'", key, raw))),
        None => Ok(default),
    }
}
