//! Workflow evaluation: combines block results through the AND/OR tree.

pub mod evaluator;
pub mod snapshot;

pub use evaluator::{TraceEntry, TraceNode, WorkflowEvaluator, WorkflowOutcome};
pub use snapshot::MarketSnapshot;
