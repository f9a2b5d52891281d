//! Moving-average cross detection
//!
//! All averages are computed by index into one materialized closes slice.
//! `end` is an exclusive index: the "current" reading ends at `closes.len()`,
//! the "previous" one at `closes.len() - 1`.

/// Averaging method selectable from the builder's "MA Type" field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaType {
    #[default]
    Sma,
    Ema,
    Wma,
}

impl MaType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "SMA" | "SIMPLE" => Some(MaType::Sma),
            "EMA" | "EXPONENTIAL" => Some(MaType::Ema),
            "WMA" | "WEIGHTED" => Some(MaType::Wma),
            _ => None,
        }
    }

    /// Average of `period` closes ending (exclusive) at `end`.
    pub fn value_at(&self, closes: &[f64], end: usize, period: usize) -> Option<f64> {
        if period == 0 || end < period || end > closes.len() {
            return None;
        }
        match self {
            MaType::Sma => sma(closes, end, period),
            MaType::Ema => ema(closes, end, period),
            MaType::Wma => wma(closes, end, period),
        }
    }
}

fn sma(closes: &[f64], end: usize, period: usize) -> Option<f64> {
    let window = closes.get(end - period..end)?;
    Some(window.iter().sum::<f64>() / window.len() as f64)
}

/// Seeded with the SMA of the first `period` closes.
fn ema(closes: &[f64], end: usize, period: usize) -> Option<f64> {
    let alpha = 2.0 / (period as f64 + 1.0);
    let seed = sma(closes, period, period)?;
    Some(
        closes[period..end]
            .iter()
            .fold(seed, |prev, close| alpha * close + (1.0 - alpha) * prev),
    )
}

/// Linear weights 1..=period, newest close weighted heaviest.
fn wma(closes: &[f64], end: usize, period: usize) -> Option<f64> {
    let window = closes.get(end - period..end)?;
    let weighted: f64 = window
        .iter()
        .enumerate()
        .map(|(i, close)| close * (i + 1) as f64)
        .sum();
    let n = period as f64;
    let norm = n * (n + 1.0) / 2.0;
    Some(weighted / norm)
}

/// A value at the latest close and one step earlier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossPair {
    pub current: f64,
    pub previous: f64,
}

impl CrossPair {
    pub fn new(current: f64, previous: f64) -> Self {
        Self { current, previous }
    }

    pub fn last_two(closes: &[f64]) -> Option<Self> {
        match closes {
            [.., previous, current] => Some(Self::new(*current, *previous)),
            _ => None,
        }
    }

    pub fn moving_average(ma_type: MaType, closes: &[f64], period: usize) -> Option<Self> {
        let len = closes.len();
        if len <= period {
            return None;
        }
        Some(Self::new(
            ma_type.value_at(closes, len, period)?,
            ma_type.value_at(closes, len - 1, period)?,
        ))
    }

    /// Moved from at-or-below `other` to strictly above it.
    pub fn crossed_above(&self, other: &CrossPair) -> bool {
        self.current > other.current && self.previous <= other.previous
    }

    /// Moved from at-or-above `other` to strictly below it.
    pub fn crossed_below(&self, other: &CrossPair) -> bool {
        self.current < other.current && self.previous >= other.previous
    }
}

/// Everything a cross condition can look at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovingAverageReadings {
    pub price: CrossPair,
    pub ma: CrossPair,
    /// `None` when the series is too short for the fast/slow windows.
    pub fast_ma: Option<CrossPair>,
    pub slow_ma: Option<CrossPair>,
}

impl MovingAverageReadings {
    /// Requires `period + 1` closes; the fast/slow pair is filled in only when
    /// the series also covers those windows.
    pub fn compute(
        closes: &[f64],
        ma_type: MaType,
        period: usize,
        fast: usize,
        slow: usize,
    ) -> Option<Self> {
        let ma = CrossPair::moving_average(ma_type, closes, period)?;
        let price = CrossPair::last_two(closes)?;
        Some(Self {
            price,
            ma,
            fast_ma: CrossPair::moving_average(ma_type, closes, fast),
            slow_ma: CrossPair::moving_average(ma_type, closes, slow),
        })
    }
}

/// Cross rules. They fire on the transition only, never on the steady state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaCondition {
    PriceAboveMa,
    PriceBelowMa,
    MaFastAboveSlow,
    MaFastBelowSlow,
    Unsupported(String),
}

impl MaCondition {
    /// Accepts `price_above_ma` as well as the builder's `priceAboveMA`.
    pub fn parse(raw: &str) -> Self {
        let key: String = raw
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "priceabovema" => MaCondition::PriceAboveMa,
            "pricebelowma" => MaCondition::PriceBelowMa,
            "mafastaboveslow" | "fastmaaboveslowma" => MaCondition::MaFastAboveSlow,
            "mafastbelowslow" | "fastmabelowslowma" => MaCondition::MaFastBelowSlow,
            _ => MaCondition::Unsupported(raw.to_string()),
        }
    }

    pub fn is_met(&self, readings: &MovingAverageReadings) -> bool {
        match self {
            MaCondition::PriceAboveMa => readings.price.crossed_above(&readings.ma),
            MaCondition::PriceBelowMa => readings.price.crossed_below(&readings.ma),
            MaCondition::MaFastAboveSlow => match (readings.fast_ma, readings.slow_ma) {
                (Some(fast), Some(slow)) => fast.crossed_above(&slow),
                _ => false,
            },
            MaCondition::MaFastBelowSlow => match (readings.fast_ma, readings.slow_ma) {
                (Some(fast), Some(slow)) => fast.crossed_below(&slow),
                _ => false,
            },
            MaCondition::Unsupported(_) => false,
        }
    }
}
