//! One-shot alert evaluation
//!
//! Evaluates every active alert once and exits. Meant to be invoked by an
//! external scheduler; exits non-zero only when the batch cannot start.

use dotenvy::dotenv;
use std::sync::Arc;
use tracing::info;
use wickping::cache::RedisCache;
use wickping::config::{self, EvaluationConfig};
use wickping::core::runner::AlertEvaluationRunner;
use wickping::logging;
use wickping::metrics::Metrics;
use wickping::services::{CachedMarketDataProvider, JsonFileAlertStore, LogNotifier};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let eval_config = EvaluationConfig::from_env()?;
    info!(alerts_path = %eval_config.alerts_path.display(), "Evaluating alerts");

    let metrics = Arc::new(Metrics::new()?);
    let cache = Arc::new(
        RedisCache::new(&config::get_redis_url(), eval_config.cache_prefix.clone()).await?,
    );
    metrics.cache_connected.set(1.0);

    let runner = AlertEvaluationRunner::new(
        Arc::new(
            JsonFileAlertStore::new(eval_config.alerts_path.clone())
                .with_metrics(metrics.clone()),
        ),
        Arc::new(CachedMarketDataProvider::new(cache)),
        Arc::new(LogNotifier),
    )
    .with_concurrency(eval_config.concurrency)
    .with_metrics(metrics);

    let summary = runner.run().await?;
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
