//! Job handlers for alert evaluation

use crate::jobs::context::JobContext;
use crate::jobs::types::EvaluateAlertsJob;
use apalis::prelude::*;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Runs one evaluation batch. Per-alert problems never fail the job; only an
/// unreadable alert store does, so apalis can retry the whole batch.
pub async fn handle_evaluate_alerts(
    job: EvaluateAlertsJob,
    ctx: Data<Arc<JobContext>>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let queued_for = Utc::now() - job.scheduled_at;
    debug!(
        scheduled_at = %job.scheduled_at,
        queued_ms = queued_for.num_milliseconds(),
        "EvaluateAlertsJob: starting batch scheduled at {}",
        job.scheduled_at
    );

    let summary = ctx.runner.run().await.map_err(|e| {
        error!(error = %e, "EvaluateAlertsJob: batch aborted: {}", e);
        Box::new(e) as Box<dyn std::error::Error + Send + Sync>
    })?;

    info!(
        evaluated = summary.evaluated,
        triggered = summary.triggered,
        failed = summary.failed,
        "EvaluateAlertsJob: evaluated {} alerts, {} would trigger",
        summary.evaluated,
        summary.triggered
    );

    if let Some(ref metrics) = ctx.metrics {
        if let Ok(rendered) = metrics.render() {
            debug!(metrics = %rendered, "EvaluateAlertsJob: metrics after batch");
        }
    }

    Ok(())
}
