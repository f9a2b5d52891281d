//! Maps builder indicator names to the evaluators that understand them

use crate::indicators::moving_average::MaType;

/// Indicator families with an evaluator behind them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorKind {
    /// `ma_type` is set when the name itself picks the average (e.g. "EMA").
    MovingAverage { ma_type: Option<MaType> },
}

impl IndicatorKind {
    /// Case, spacing and punctuation are ignored: "Moving Average",
    /// "moving-average" and "MA" are the same indicator.
    pub fn from_name(name: &str) -> Option<Self> {
        let key: String = name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "movingaverage" | "ma" => Some(IndicatorKind::MovingAverage { ma_type: None }),
            "sma" => Some(IndicatorKind::MovingAverage { ma_type: Some(MaType::Sma) }),
            "ema" => Some(IndicatorKind::MovingAverage { ma_type: Some(MaType::Ema) }),
            "wma" => Some(IndicatorKind::MovingAverage { ma_type: Some(MaType::Wma) }),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            IndicatorKind::MovingAverage { .. } => "moving_average",
        }
    }
}
