pub mod error;
pub mod evaluator;
pub mod moving_average;
pub mod parser;
pub mod registry;

pub use error::IndicatorError;
pub use evaluator::IndicatorEvaluator;
pub use moving_average::{CrossPair, MaCondition, MaType, MovingAverageReadings};
pub use parser::MovingAverageConfig;
pub use registry::IndicatorKind;
