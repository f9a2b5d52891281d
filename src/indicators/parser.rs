//! Reads indicator parameters out of a block's free-form config map

use crate::indicators::error::IndicatorError;
use crate::indicators::moving_average::{MaCondition, MaType};
use crate::models::candle::BASE_INTERVAL;
use crate::utils::serde::value_as_usize;
use serde_json::{Map, Value};

pub const DEFAULT_PERIOD: usize = 20;
pub const DEFAULT_FAST_PERIOD: usize = 9;
pub const DEFAULT_SLOW_PERIOD: usize = 21;
/// Longest window a block may ask for; 10k daily closes is ~27 years of data
pub const MAX_PERIOD: usize = 10_000;

/// Parameters of a moving-average condition block
#[derive(Debug, Clone, PartialEq)]
pub struct MovingAverageConfig {
    /// Left as text; the aggregator owns the supported-interval check.
    pub interval: String,
    pub period: usize,
    pub fast: usize,
    pub slow: usize,
    pub condition: MaCondition,
    pub ma_type: MaType,
}

impl MovingAverageConfig {
    /// `ma_type` from the indicator name wins over the config's `maType`.
    pub fn from_map(
        config: &Map<String, Value>,
        ma_type: Option<MaType>,
    ) -> Result<Self, IndicatorError> {
        let interval = first_present(config, &["interval", "timeframe"])
            .map(|v| match v {
                Value::String(s) => Ok(s.trim().to_string()),
                _ => Err(IndicatorError::InvalidValue {
                    field: "interval".to_string(),
                    reason: "expected a string".to_string(),
                }),
            })
            .transpose()?
            .unwrap_or_else(|| BASE_INTERVAL.to_string());

        let ma_type = match ma_type {
            Some(t) => t,
            None => match first_present(config, &["maType", "ma_type"]) {
                Some(v) => v.as_str().and_then(MaType::parse).ok_or_else(|| {
                    IndicatorError::InvalidValue {
                        field: "maType".to_string(),
                        reason: v.to_string(),
                    }
                })?,
                None => MaType::default(),
            },
        };

        let condition = config
            .get("condition")
            .and_then(Value::as_str)
            .map(MaCondition::parse)
            .unwrap_or_else(|| MaCondition::Unsupported(String::new()));

        Ok(Self {
            interval,
            period: parse_period(config, &["period"], DEFAULT_PERIOD)?,
            fast: parse_period(config, &["fast", "fastPeriod"], DEFAULT_FAST_PERIOD)?,
            slow: parse_period(config, &["slow", "slowPeriod"], DEFAULT_SLOW_PERIOD)?,
            condition,
            ma_type,
        })
    }

    /// Base candles needed before an evaluation is attempted
    pub fn required_base_candles(&self) -> usize {
        self.period.saturating_mul(4).max(100)
    }
}

fn first_present<'a>(config: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| config.get(*key))
        .find(|v| !v.is_null())
}

pub fn parse_period(
    config: &Map<String, Value>,
    keys: &[&str],
    default: usize,
) -> Result<usize, IndicatorError> {
    let Some(value) = first_present(config, keys) else {
        return Ok(default);
    };
    let period = value_as_usize(value)
        .ok_or_else(|| IndicatorError::InvalidNumericFormat(keys[0].to_string()))?;
    if period == 0 || period > MAX_PERIOD {
        return Err(IndicatorError::InvalidValue {
            field: keys[0].to_string(),
            reason: format!("period must be between 1 and {}", MAX_PERIOD),
        });
    }
    Ok(period)
}
