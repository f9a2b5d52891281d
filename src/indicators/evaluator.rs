//! Evaluates one indicator block against a base-resolution candle series

use crate::candles::CandleAggregator;
use crate::error::Result;
use crate::indicators::moving_average::{MaType, MovingAverageReadings};
use crate::indicators::parser::MovingAverageConfig;
use crate::indicators::registry::IndicatorKind;
use crate::models::candle::{Candle, Interval};
use crate::models::workflow::{Block, BlockType};
use tracing::{debug, error, warn};

pub struct IndicatorEvaluator;

impl IndicatorEvaluator {
    /// Never fails: anything that cannot be evaluated is `false`. An
    /// unsupported interval is logged at error level since it is a
    /// misconfigured block rather than missing data.
    pub fn evaluate(block: &Block, candles: &[Candle]) -> bool {
        match Self::try_evaluate(block, candles) {
            Ok(passed) => passed,
            Err(e) => {
                error!(
                    block_id = %block.id,
                    indicator = %block.content,
                    error = %e,
                    "IndicatorEvaluator: block {} cannot be evaluated: {}",
                    block.id,
                    e
                );
                false
            }
        }
    }

    /// Like [`evaluate`](Self::evaluate) but surfaces `UnsupportedInterval`.
    pub fn try_evaluate(block: &Block, candles: &[Candle]) -> Result<bool> {
        if block.block_type != BlockType::Indicator {
            // Social and economic feeds are not wired into evaluation.
            return Ok(false);
        }

        let Some(kind) = IndicatorKind::from_name(&block.content) else {
            debug!(
                block_id = %block.id,
                indicator = %block.content,
                "IndicatorEvaluator: no evaluator for indicator"
            );
            return Ok(false);
        };

        match kind {
            IndicatorKind::MovingAverage { ma_type } => {
                Self::evaluate_moving_average(block, ma_type, candles)
            }
        }
    }

    fn evaluate_moving_average(
        block: &Block,
        ma_type: Option<MaType>,
        candles: &[Candle],
    ) -> Result<bool> {
        let config = match MovingAverageConfig::from_map(&block.config, ma_type) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    block_id = %block.id,
                    error = %e,
                    "IndicatorEvaluator: invalid moving average config"
                );
                return Ok(false);
            }
        };
        // Checked before the data so a bad timeframe shows up on every run.
        let interval: Interval = config.interval.parse()?;

        let required = config.required_base_candles();
        if candles.len() < required {
            debug!(
                block_id = %block.id,
                count = candles.len(),
                required = required,
                "IndicatorEvaluator: not enough candles ({} < {})",
                candles.len(),
                required
            );
            return Ok(false);
        }

        let closes: Vec<f64> = CandleAggregator::aggregate_to(candles, interval)
            .iter()
            .map(|c| c.close)
            .collect();
        if closes.len() <= config.period {
            debug!(
                block_id = %block.id,
                interval = %interval,
                closes = closes.len(),
                period = config.period,
                "IndicatorEvaluator: not enough {} closes for period {}",
                interval,
                config.period
            );
            return Ok(false);
        }

        let Some(readings) = MovingAverageReadings::compute(
            &closes,
            config.ma_type,
            config.period,
            config.fast,
            config.slow,
        ) else {
            return Ok(false);
        };

        let passed = config.condition.is_met(&readings);
        debug!(
            block_id = %block.id,
            condition = ?config.condition,
            latest_price = readings.price.current,
            ma = readings.ma.current,
            passed = passed,
            "IndicatorEvaluator: moving average condition evaluated"
        );
        Ok(passed)
    }
}
