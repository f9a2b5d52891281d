//! Wickping alert evaluation engine.
//!
//! Turns cached 15-minute candles into higher-timeframe series, evaluates
//! nested AND/OR alert workflows against them and reports which alerts
//! would trigger.

pub mod cache;
pub mod candles;
pub mod config;
pub mod core;
pub mod error;
pub mod indicators;
pub mod jobs;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod utils;
pub mod workflows;

pub use error::{Error, Result};
