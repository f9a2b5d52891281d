//! Evaluates every active alert once per batch

use crate::config::DEFAULT_CONCURRENCY;
use crate::error::Result;
use crate::metrics::Metrics;
use crate::models::alert::Alert;
use crate::models::candle::{Candle, BASE_INTERVAL};
use crate::models::workflow::Workflow;
use crate::services::alert_store::AlertStore;
use crate::services::market_data::MarketDataProvider;
use crate::services::notifier::AlertNotifier;
use crate::workflows::{MarketSnapshot, TraceEntry, WorkflowEvaluator, WorkflowOutcome};
use futures_util::stream::{self, StreamExt};
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Decision for one alert in a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertOutcome {
    pub alert_id: i64,
    pub triggered: bool,
    /// Evaluation faulted; `triggered` is then always false.
    pub failed: bool,
    pub trace: Vec<TraceEntry>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub evaluated: usize,
    pub triggered: usize,
    pub failed: usize,
    /// In the order the store returned the alerts
    pub outcomes: Vec<AlertOutcome>,
}

impl RunSummary {
    fn record(&mut self, outcome: AlertOutcome) {
        self.evaluated += 1;
        if outcome.triggered {
            self.triggered += 1;
        }
        if outcome.failed {
            self.failed += 1;
        }
        self.outcomes.push(outcome);
    }
}

/// Decides one alert against the batch snapshot, on the blocking pool
pub type EvaluateFn = fn(&MarketSnapshot, &Workflow) -> WorkflowOutcome;

fn evaluate_workflow(market: &MarketSnapshot, workflow: &Workflow) -> WorkflowOutcome {
    WorkflowEvaluator::new(market).evaluate_traced(workflow)
}

pub struct AlertEvaluationRunner {
    alerts: Arc<dyn AlertStore>,
    market_data: Arc<dyn MarketDataProvider>,
    notifier: Arc<dyn AlertNotifier>,
    metrics: Option<Arc<Metrics>>,
    concurrency: usize,
    evaluate: EvaluateFn,
}

impl AlertEvaluationRunner {
    pub fn new(
        alerts: Arc<dyn AlertStore>,
        market_data: Arc<dyn MarketDataProvider>,
        notifier: Arc<dyn AlertNotifier>,
    ) -> Self {
        Self {
            alerts,
            market_data,
            notifier,
            metrics: None,
            concurrency: DEFAULT_CONCURRENCY,
            evaluate: evaluate_workflow,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_evaluator(mut self, evaluate: EvaluateFn) -> Self {
        self.evaluate = evaluate;
        self
    }

    /// One pass over the active alerts.
    ///
    /// Only a failure to list alerts is returned as an error. Missing candle
    /// data and faults inside a single alert's evaluation turn into a
    /// no-trigger for that alert and the batch carries on.
    pub async fn run(&self) -> Result<RunSummary> {
        let start = Instant::now();

        let alerts: Vec<Arc<Alert>> = self
            .alerts
            .active_alerts()
            .await?
            .into_iter()
            .filter(Alert::is_evaluable)
            .map(Arc::new)
            .collect();

        if alerts.is_empty() {
            info!("AlertEvaluationRunner: no active alerts to evaluate");
            return Ok(RunSummary::default());
        }

        info!(
            alert_count = alerts.len(),
            concurrency = self.concurrency,
            "AlertEvaluationRunner: evaluating {} active alerts",
            alerts.len()
        );

        let snapshot = Arc::new(self.load_snapshot(&alerts).await);

        let evaluations = alerts.into_iter().map(|alert| {
            let snapshot = snapshot.clone();
            let metrics = self.metrics.clone();
            let evaluate = self.evaluate;
            async move {
                let outcome = evaluate_isolated(evaluate, alert.clone(), snapshot, metrics).await;
                (alert, outcome)
            }
        });
        let results: Vec<(Arc<Alert>, AlertOutcome)> = stream::iter(evaluations)
            .buffered(self.concurrency)
            .collect()
            .await;

        let mut summary = RunSummary::default();
        for (alert, outcome) in results {
            self.notifier.notify(&alert, &outcome).await;
            summary.record(outcome);
        }

        if let Some(ref metrics) = self.metrics {
            metrics
                .alert_batch_duration_seconds
                .observe(start.elapsed().as_secs_f64());
        }

        info!(
            evaluated = summary.evaluated,
            triggered = summary.triggered,
            failed = summary.failed,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "AlertEvaluationRunner: batch complete, {} of {} alerts would trigger",
            summary.triggered,
            summary.evaluated
        );
        Ok(summary)
    }

    /// Fetch each referenced symbol's base series once for the whole batch.
    async fn load_snapshot(&self, alerts: &[Arc<Alert>]) -> MarketSnapshot {
        let symbols: BTreeSet<String> = alerts
            .iter()
            .flat_map(|alert| alert.workflow.symbols())
            .collect();

        let fetches = symbols.into_iter().map(|symbol| {
            let provider = self.market_data.clone();
            async move {
                let result = provider.get_candles(&symbol, BASE_INTERVAL).await;
                (symbol, result)
            }
        });
        let results: Vec<(String, Result<Vec<Candle>>)> = stream::iter(fetches)
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        let mut snapshot = MarketSnapshot::new();
        for (symbol, result) in results {
            let candles = match result {
                Ok(candles) if !candles.is_empty() => candles,
                Ok(_) => {
                    warn!(
                        symbol = %symbol,
                        interval = %BASE_INTERVAL,
                        "AlertEvaluationRunner: no cached candles for {}",
                        symbol
                    );
                    self.count_unavailable();
                    Vec::new()
                }
                Err(e) => {
                    warn!(
                        symbol = %symbol,
                        interval = %BASE_INTERVAL,
                        error = %e,
                        "AlertEvaluationRunner: market data unavailable for {}: {}",
                        symbol,
                        e
                    );
                    self.count_unavailable();
                    Vec::new()
                }
            };
            debug!(
                symbol = %symbol,
                count = candles.len(),
                "AlertEvaluationRunner: loaded candles"
            );
            snapshot.insert(&symbol, candles);
        }
        snapshot
    }

    fn count_unavailable(&self) {
        if let Some(ref metrics) = self.metrics {
            metrics.market_data_unavailable_total.inc();
        }
    }
}

/// Evaluation runs on the blocking pool; a panic there is contained to this alert.
async fn evaluate_isolated(
    evaluate: EvaluateFn,
    alert: Arc<Alert>,
    snapshot: Arc<MarketSnapshot>,
    metrics: Option<Arc<Metrics>>,
) -> AlertOutcome {
    if let Some(ref metrics) = metrics {
        metrics.alert_evaluations_active.inc();
    }

    let task_alert = alert.clone();
    let joined =
        tokio::task::spawn_blocking(move || evaluate(&*snapshot, &task_alert.workflow)).await;

    let outcome = match joined {
        Ok(result) => AlertOutcome {
            alert_id: alert.id,
            triggered: result.triggered,
            failed: false,
            trace: result.trace,
        },
        Err(e) => {
            error!(
                alert_id = alert.id,
                error = %e,
                "AlertEvaluationRunner: evaluation of alert #{} faulted, treating as no-trigger",
                alert.id
            );
            AlertOutcome {
                alert_id: alert.id,
                triggered: false,
                failed: true,
                trace: Vec::new(),
            }
        }
    };

    debug!(
        alert_id = alert.id,
        name = %alert.name,
        triggered = outcome.triggered,
        "AlertEvaluationRunner: evaluated alert #{}",
        alert.id
    );

    if let Some(ref metrics) = metrics {
        metrics.alert_evaluations_active.dec();
        metrics.alert_evaluations_total.inc();
        if outcome.triggered {
            metrics.alerts_triggered_total.inc();
        }
        if outcome.failed {
            metrics.alert_evaluation_failures_total.inc();
        }
    }

    outcome
}
