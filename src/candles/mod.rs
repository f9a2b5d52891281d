//! Candle series transformations

pub mod aggregator;

pub use aggregator::CandleAggregator;
