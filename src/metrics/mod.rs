//! Prometheus metrics for alert evaluation batches

use crate::error::Result;
use prometheus::{
    Encoder, Gauge, Histogram, HistogramOpts, IntCounter, IntGauge, Registry, TextEncoder,
};

pub struct Metrics {
    registry: Registry,
    pub alert_evaluations_total: IntCounter,
    pub alerts_triggered_total: IntCounter,
    pub alert_evaluation_failures_total: IntCounter,
    pub market_data_unavailable_total: IntCounter,
    pub alert_records_rejected_total: IntCounter,
    pub alert_evaluations_active: IntGauge,
    pub alert_batch_duration_seconds: Histogram,
    pub cache_connected: Gauge,
}

impl Metrics {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let alert_evaluations_total = IntCounter::new(
            "alert_evaluations_total",
            "Alerts evaluated across all batches",
        )?;
        let alerts_triggered_total =
            IntCounter::new("alerts_triggered_total", "Alerts whose workflow matched")?;
        let alert_evaluation_failures_total = IntCounter::new(
            "alert_evaluation_failures_total",
            "Alert evaluations that faulted and were reported as no-trigger",
        )?;
        let market_data_unavailable_total = IntCounter::new(
            "market_data_unavailable_total",
            "Symbol series that could not be read from the candle cache",
        )?;
        let alert_records_rejected_total = IntCounter::new(
            "alert_records_rejected_total",
            "Stored alert records skipped because they could not be read",
        )?;
        let alert_evaluations_active = IntGauge::new(
            "alert_evaluations_active",
            "Alert evaluations currently in flight",
        )?;
        let alert_batch_duration_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "alert_batch_duration_seconds",
                "Wall-clock time of one evaluate-all-alerts batch",
            )
            .buckets(vec![0.05, 0.1, 0.5, 1.0, 5.0, 15.0, 60.0, 300.0]),
        )?;
        let cache_connected =
            Gauge::new("cache_connected", "1 when the candle cache is reachable")?;

        registry.register(Box::new(alert_evaluations_total.clone()))?;
        registry.register(Box::new(alerts_triggered_total.clone()))?;
        registry.register(Box::new(alert_evaluation_failures_total.clone()))?;
        registry.register(Box::new(market_data_unavailable_total.clone()))?;
        registry.register(Box::new(alert_records_rejected_total.clone()))?;
        registry.register(Box::new(alert_evaluations_active.clone()))?;
        registry.register(Box::new(alert_batch_duration_seconds.clone()))?;
        registry.register(Box::new(cache_connected.clone()))?;

        Ok(Self {
            registry,
            alert_evaluations_total,
            alerts_triggered_total,
            alert_evaluation_failures_total,
            market_data_unavailable_total,
            alert_records_rejected_total,
            alert_evaluations_active,
            alert_batch_duration_seconds,
            cache_connected,
        })
    }

    /// Text exposition format of every registered metric
    pub fn render(&self) -> Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
