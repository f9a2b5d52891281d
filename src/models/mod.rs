//! Shared data models spanning the engine layers.

pub mod alert;
pub mod candle;
pub mod workflow;

pub use alert::{Alert, AlertStatus};
pub use candle::{Candle, Interval, BASE_INTERVAL};
pub use workflow::{Block, BlockType, Group, LogicalOperator, Node, Workflow};
