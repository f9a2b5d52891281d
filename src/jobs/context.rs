//! Job context for dependency injection

use crate::core::runner::AlertEvaluationRunner;
use crate::metrics::Metrics;
use std::sync::Arc;

/// Context passed to job handlers via Apalis Data<T> pattern
///
/// The runner holds read-only access to the alert store and the candle
/// cache; jobs never write market data.
pub struct JobContext {
    pub runner: Arc<AlertEvaluationRunner>,
    pub metrics: Option<Arc<Metrics>>,
}

impl JobContext {
    pub fn new(runner: Arc<AlertEvaluationRunner>, metrics: Option<Arc<Metrics>>) -> Self {
        Self { runner, metrics }
    }
}
