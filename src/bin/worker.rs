//! Wickping Worker
//!
//! Schedules alert evaluation batches on a cron cadence and processes them
//! from the Redis queue.

use apalis_redis::RedisStorage;
use dotenvy::dotenv;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};
use wickping::cache::RedisCache;
use wickping::config::{self, EvaluationConfig};
use wickping::core::runner::AlertEvaluationRunner;
use wickping::core::runtime::AlertRuntime;
use wickping::core::scheduler::JobScheduler;
use wickping::jobs::context::JobContext;
use wickping::jobs::types::EvaluateAlertsJob;
use wickping::logging;
use wickping::metrics::Metrics;
use wickping::services::{CachedMarketDataProvider, JsonFileAlertStore, LogNotifier};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let env = config::get_environment();
    info!("Starting Wickping Worker");
    info!(environment = %env, "Environment");

    let eval_config = EvaluationConfig::from_env()?;
    info!(
        interval = eval_config.interval_seconds,
        cron = ?eval_config.cron,
        concurrency = eval_config.concurrency,
        alerts_path = %eval_config.alerts_path.display(),
        "Alert evaluation settings"
    );

    let metrics = Arc::new(Metrics::new()?);

    info!("Initializing Redis candle cache...");
    let redis_url = config::get_redis_url();
    let cache = match RedisCache::new(&redis_url, eval_config.cache_prefix.clone()).await {
        Ok(c) => {
            info!("Redis connected");
            metrics.cache_connected.set(1.0);
            Arc::new(c)
        }
        Err(e) => {
            warn!(error = %e, "Failed to connect to Redis");
            return Err(format!("Redis connection required for worker: {}", e).into());
        }
    };

    let runner = AlertEvaluationRunner::new(
        Arc::new(
            JsonFileAlertStore::new(eval_config.alerts_path.clone())
                .with_metrics(metrics.clone()),
        ),
        Arc::new(CachedMarketDataProvider::new(cache)),
        Arc::new(LogNotifier),
    )
    .with_concurrency(eval_config.concurrency)
    .with_metrics(metrics.clone());

    let job_context = Arc::new(JobContext::new(Arc::new(runner), Some(metrics)));

    info!("Initializing Apalis Redis storage...");
    let conn = apalis_redis::connect(redis_url).await?;
    let storage: Arc<RedisStorage<EvaluateAlertsJob>> = Arc::new(RedisStorage::new(conn));

    let runtime = AlertRuntime::new(job_context, storage.clone());
    let worker_handles = runtime.start_workers();

    let scheduler = match eval_config.cron {
        Some(ref expr) => JobScheduler::with_cron(storage, expr)?,
        None => JobScheduler::new(storage, eval_config.interval_seconds)?,
    };
    scheduler.start().await?;

    info!("Worker started, waiting for shutdown signal...");
    signal::ctrl_c().await?;

    info!("Shutting down worker...");
    scheduler.stop().await;
    for handle in worker_handles {
        handle.abort();
    }
    info!("Worker stopped");

    Ok(())
}
