//! Cron-based scheduler for enqueuing alert evaluation batches

use crate::error::{Error, Result};
use crate::jobs::types::EvaluateAlertsJob;
use apalis::prelude::*;
use apalis_redis::RedisStorage;
use cron::Schedule;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info};

/// Cron expression (seconds-resolution, 6 fields) firing every `interval_seconds`.
///
/// Intervals are rounded down to the largest whole unit: seconds below a
/// minute, minutes below an hour, hours below a day, days beyond.
pub fn cron_expression_for_interval(interval_seconds: u64) -> Result<String> {
    match interval_seconds {
        0 => Err(Error::Scheduler(
            "Scheduler disabled: interval_seconds is 0".to_string(),
        )),
        s if s < 60 => Ok(format!("*/{} * * * * *", s)),
        s if s < 3_600 => Ok(format!("0 */{} * * * *", s / 60)),
        s if s < 86_400 => Ok(format!("0 0 */{} * * *", s / 3_600)),
        s => Ok(format!("0 0 0 */{} * *", s / 86_400)),
    }
}

pub fn parse_schedule(expr: &str) -> Result<Schedule> {
    Schedule::from_str(expr)
        .map_err(|e| Error::Scheduler(format!("Invalid cron expression '{}': {}", expr, e)))
}

/// Scheduler that periodically enqueues an EvaluateAlertsJob
pub struct JobScheduler {
    storage: Arc<RedisStorage<EvaluateAlertsJob>>,
    schedule: Schedule,
    handle: Arc<RwLock<Option<tokio::task::JoinHandle<()>>>>,
}

impl JobScheduler {
    pub fn new(
        storage: Arc<RedisStorage<EvaluateAlertsJob>>,
        interval_seconds: u64,
    ) -> Result<Self> {
        let cron_expr = cron_expression_for_interval(interval_seconds)?;
        info!(
            interval = interval_seconds,
            cron = %cron_expr,
            "JobScheduler: interval {}s mapped to cron '{}'",
            interval_seconds,
            cron_expr
        );
        Self::with_cron(storage, &cron_expr)
    }

    pub fn with_cron(
        storage: Arc<RedisStorage<EvaluateAlertsJob>>,
        cron_expr: &str,
    ) -> Result<Self> {
        let schedule = parse_schedule(cron_expr)?;
        info!(cron = %cron_expr, "JobScheduler: created with cron '{}'", cron_expr);
        Ok(Self {
            storage,
            schedule,
            handle: Arc::new(RwLock::new(None)),
        })
    }

    /// Start the scheduler
    pub async fn start(&self) -> Result<()> {
        let storage = self.storage.clone();
        let schedule = self.schedule.clone();

        let handle = tokio::spawn(async move {
            info!("JobScheduler: started, waiting for cron schedule...");

            loop {
                let Some(next_tick) = schedule.upcoming(chrono::Utc).next() else {
                    tokio::time::sleep(tokio::time::Duration::from_secs(60)).await;
                    continue;
                };
                let now = chrono::Utc::now();
                if next_tick > now {
                    let wait = (next_tick - now).to_std().unwrap_or_default();
                    tokio::time::sleep(wait).await;
                }

                let mut storage_clone = (*storage).clone();
                match storage_clone.push(EvaluateAlertsJob::new(next_tick)).await {
                    Ok(_) => {
                        debug!(tick = %next_tick, "JobScheduler: enqueued EvaluateAlertsJob");
                    }
                    Err(e) => {
                        error!(
                            tick = %next_tick,
                            error = %e,
                            "JobScheduler: failed to enqueue EvaluateAlertsJob"
                        );
                    }
                }
            }
        });

        *self.handle.write().await = Some(handle);
        info!("JobScheduler: started successfully");
        Ok(())
    }

    /// Stop the scheduler
    pub async fn stop(&self) {
        if let Some(h) = self.handle.write().await.take() {
            h.abort();
            info!("JobScheduler: stopped");
        }
    }
}
