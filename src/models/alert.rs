//! Alert records as read from the alert store

use crate::models::workflow::Workflow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub id: i64,
    #[serde(alias = "user_id")]
    pub owner: i64,
    pub name: String,
    #[serde(default)]
    pub workflow: Workflow,
    #[serde(default, alias = "delivery")]
    pub delivery_methods: BTreeSet<String>,
    #[serde(default)]
    pub status: AlertStatus,
    /// Soft-delete marker; trashed alerts are recoverable until force-deleted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum AlertStatus {
    #[default]
    Active,
    Paused,
}

impl From<String> for AlertStatus {
    /// Anything that is not explicitly active is treated as paused.
    fn from(raw: String) -> Self {
        if raw.trim().eq_ignore_ascii_case("active") {
            AlertStatus::Active
        } else {
            AlertStatus::Paused
        }
    }
}

impl Alert {
    pub fn new(id: i64, owner: i64, name: impl Into<String>, workflow: Workflow) -> Self {
        Self {
            id,
            owner,
            name: name.into(),
            workflow,
            delivery_methods: BTreeSet::new(),
            status: AlertStatus::Active,
            deleted_at: None,
        }
    }

    pub fn with_delivery(mut self, method: impl Into<String>) -> Self {
        self.delivery_methods.insert(method.into());
        self
    }

    pub fn is_trashed(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Active and not soft-deleted
    pub fn is_evaluable(&self) -> bool {
        self.status == AlertStatus::Active && !self.is_trashed()
    }
}
