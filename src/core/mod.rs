//! Core application primitives (runner, job runtime, scheduler)

pub mod runner;
pub mod runtime;
pub mod scheduler;

pub use runner::{AlertEvaluationRunner, AlertOutcome, EvaluateFn, RunSummary};
pub use runtime::AlertRuntime;
pub use scheduler::JobScheduler;
