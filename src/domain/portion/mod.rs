//! Portion Module - Pure domain services for portion calculation.
//!
//! Converts a consumed total weight into per-ingredient consumed weights.
//! Everything here is synchronous and free of I/O; applying a result to a
//! stored recipe is the registry's job.

mod calculator;
mod result;

pub use calculator::{CalculatorLimits, ConsumptionSummary, PortionCalculator};
pub use result::{ConsistencyWarning, ConsumedIngredient, ConsumptionResult};
