//! Crate-wide error type

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Aggregation target outside the supported 15m/30m/1h/4h/1d set
    #[error("Unsupported interval: {0}")]
    UnsupportedInterval(String),
    #[error("Candle cache failed: {}", .source)]
    Cache {
        #[from]
        source: redis::RedisError,
    },
    #[error("Serde failed: {}", .source)]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    #[error("IO failure: {}", .source)]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("Metrics failed: {}", .source)]
    Metrics {
        #[from]
        source: prometheus::Error,
    },
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Scheduler failed: {0}")]
    Scheduler(String),
}
