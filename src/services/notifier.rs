//! Hook for the delivery subsystem

use crate::core::runner::AlertOutcome;
use crate::models::alert::Alert;
use async_trait::async_trait;
use tracing::info;

/// Receives every evaluated alert with its decision. Delivery (email, SMS,
/// Discord) lives behind implementations of this trait.
#[async_trait]
pub trait AlertNotifier: Send + Sync {
    async fn notify(&self, alert: &Alert, outcome: &AlertOutcome);
}

/// Logs decisions only
pub struct LogNotifier;

#[async_trait]
impl AlertNotifier for LogNotifier {
    async fn notify(&self, alert: &Alert, outcome: &AlertOutcome) {
        if outcome.triggered {
            info!(
                alert_id = alert.id,
                owner = alert.owner,
                delivery = ?alert.delivery_methods,
                "Alert #{} '{}' would TRIGGER",
                alert.id,
                alert.name
            );
        } else {
            info!(
                alert_id = alert.id,
                failed = outcome.failed,
                "Alert #{} '{}' does not match",
                alert.id,
                alert.name
            );
        }
    }
}
