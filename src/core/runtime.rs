//! Apalis worker setup for alert evaluation jobs

use crate::jobs::context::JobContext;
use crate::jobs::handlers;
use crate::jobs::types::EvaluateAlertsJob;
use apalis::prelude::*;
use apalis_redis::RedisStorage;
use std::sync::Arc;
use tracing::info;

/// Alert runtime that sets up the Apalis worker
pub struct AlertRuntime {
    job_context: Arc<JobContext>,
    storage: Arc<RedisStorage<EvaluateAlertsJob>>,
}

impl AlertRuntime {
    pub fn new(
        job_context: Arc<JobContext>,
        storage: Arc<RedisStorage<EvaluateAlertsJob>>,
    ) -> Self {
        Self {
            job_context,
            storage,
        }
    }

    /// Start the worker and return its handle for shutdown
    pub fn start_workers(&self) -> Vec<tokio::task::JoinHandle<()>> {
        let storage = (*self.storage).clone();
        let job_context = self.job_context.clone();

        let handle = tokio::spawn(async move {
            let worker = WorkerBuilder::new("evaluate-alerts-worker")
                .data(job_context)
                .backend(storage)
                .build_fn(handlers::handle_evaluate_alerts);

            info!("AlertRuntime: EvaluateAlertsJob worker started");
            worker.run().await;
        });

        vec![handle]
    }
}
