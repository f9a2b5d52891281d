use thiserror::Error;

/// Problems reading an indicator block's config
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndicatorError {
    #[error("Invalid numeric format for {0}")]
    InvalidNumericFormat(String),
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}
