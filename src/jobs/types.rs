//! Job types for the alert evaluation queue

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Evaluate every active alert once
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateAlertsJob {
    /// Cron tick that produced the job
    pub scheduled_at: DateTime<Utc>,
}

impl EvaluateAlertsJob {
    pub fn new(scheduled_at: DateTime<Utc>) -> Self {
        Self { scheduled_at }
    }
}
