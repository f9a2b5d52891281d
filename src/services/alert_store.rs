//! Alert sources for the evaluation runner

use crate::error::Result;
use crate::metrics::Metrics;
use crate::models::alert::{Alert, AlertStatus};
use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::warn;

#[async_trait]
pub trait AlertStore: Send + Sync {
    /// Alerts with `status == active` that are not soft-deleted
    async fn active_alerts(&self) -> Result<Vec<Alert>>;
}

#[derive(Default)]
pub struct InMemoryAlertStore {
    alerts: RwLock<Vec<Alert>>,
}

impl InMemoryAlertStore {
    pub fn new(alerts: Vec<Alert>) -> Self {
        Self {
            alerts: RwLock::new(alerts),
        }
    }

    /// Replaces any alert with the same id
    pub async fn insert(&self, alert: Alert) {
        let mut alerts = self.alerts.write().await;
        alerts.retain(|a| a.id != alert.id);
        alerts.push(alert);
    }

    pub async fn get(&self, id: i64) -> Option<Alert> {
        self.alerts.read().await.iter().find(|a| a.id == id).cloned()
    }

    pub async fn set_status(&self, id: i64, status: AlertStatus) -> bool {
        self.update(id, |alert| {
            alert.status = status;
            true
        })
        .await
    }

    pub async fn soft_delete(&self, id: i64) -> bool {
        self.update(id, |alert| {
            if alert.is_trashed() {
                return false;
            }
            alert.deleted_at = Some(Utc::now());
            true
        })
        .await
    }

    pub async fn restore(&self, id: i64) -> bool {
        self.update(id, |alert| alert.deleted_at.take().is_some()).await
    }

    /// Only trashed alerts can be removed for good.
    pub async fn force_delete(&self, id: i64) -> bool {
        let mut alerts = self.alerts.write().await;
        let before = alerts.len();
        alerts.retain(|a| !(a.id == id && a.is_trashed()));
        alerts.len() != before
    }

    /// Permanently removes every trashed alert of `owner`; returns how many went.
    pub async fn empty_trash(&self, owner: i64) -> usize {
        let mut alerts = self.alerts.write().await;
        let before = alerts.len();
        alerts.retain(|a| !(a.owner == owner && a.is_trashed()));
        before - alerts.len()
    }

    async fn update(&self, id: i64, f: impl FnOnce(&mut Alert) -> bool) -> bool {
        let mut alerts = self.alerts.write().await;
        match alerts.iter_mut().find(|a| a.id == id) {
            Some(alert) => f(alert),
            None => false,
        }
    }
}

#[async_trait]
impl AlertStore for InMemoryAlertStore {
    async fn active_alerts(&self) -> Result<Vec<Alert>> {
        Ok(self
            .alerts
            .read()
            .await
            .iter()
            .filter(|a| a.is_evaluable())
            .cloned()
            .collect())
    }
}

/// JSON array of alerts on disk, re-read on every batch so edits apply to
/// the next run without a restart.
pub struct JsonFileAlertStore {
    path: PathBuf,
    metrics: Option<Arc<Metrics>>,
}

impl JsonFileAlertStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }
}

#[async_trait]
impl AlertStore for JsonFileAlertStore {
    async fn active_alerts(&self) -> Result<Vec<Alert>> {
        let raw = tokio::fs::read_to_string(&self.path).await?;
        // Only an unreadable document fails the batch; a bad record is skipped.
        let records: Vec<Value> = serde_json::from_str(&raw)?;

        let mut alerts = Vec::with_capacity(records.len());
        for (index, record) in records.into_iter().enumerate() {
            let id = record.get("id").cloned().unwrap_or(Value::Null);
            match serde_json::from_value::<Alert>(record) {
                Ok(alert) if alert.is_evaluable() => alerts.push(alert),
                Ok(_) => {}
                Err(e) => {
                    warn!(
                        path = %self.path.display(),
                        index = index,
                        alert_id = %id,
                        error = %e,
                        "JsonFileAlertStore: skipping unreadable alert record: {}",
                        e
                    );
                    if let Some(ref metrics) = self.metrics {
                        metrics.alert_records_rejected_total.inc();
                    }
                }
            }
        }
        Ok(alerts)
    }
}
