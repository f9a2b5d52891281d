//! Job queue system for alert evaluation batches

pub mod context;
pub mod handlers;
pub mod types;

pub use context::JobContext;
pub use types::EvaluateAlertsJob;
