//! Portion calculation limits

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::foundation::weight::{MAX_CONSUMED_WEIGHT, PORTION_SUM_TOLERANCE};
use crate::domain::portion::CalculatorLimits;

/// Portion configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PortionConfig {
    /// Largest weight accepted in a single consumption (grams)
    #[serde(default = "default_max_consumed_weight")]
    pub max_consumed_weight_g: f64,

    /// Allowed gap between requested weight and the sum of portions (grams)
    #[serde(default = "default_drift_tolerance")]
    pub drift_tolerance_g: f64,

    /// Number of consumption results kept in history
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl PortionConfig {
    /// Limits for the portion calculator
    pub fn calculator_limits(&self) -> CalculatorLimits {
        CalculatorLimits {
            max_consumed_weight: self.max_consumed_weight_g,
            drift_tolerance: self.drift_tolerance_g,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.max_consumed_weight_g.is_finite() || self.max_consumed_weight_g <= 0.0 {
            return Err(ValidationError::InvalidMaxConsumedWeight);
        }
        if !self.drift_tolerance_g.is_finite() || self.drift_tolerance_g <= 0.0 {
            return Err(ValidationError::InvalidDriftTolerance);
        }
        if self.history_limit == 0 {
            return Err(ValidationError::InvalidHistoryLimit);
        }
        Ok(())
    }
}

impl Default for PortionConfig {
    fn default() -> Self {
        Self {
            max_consumed_weight_g: default_max_consumed_weight(),
            drift_tolerance_g: default_drift_tolerance(),
            history_limit: default_history_limit(),
        }
    }
}

fn default_max_consumed_weight() -> f64 {
    MAX_CONSUMED_WEIGHT
}

fn default_drift_tolerance() -> f64 {
    PORTION_SUM_TOLERANCE
}

fn default_history_limit() -> usize {
    100
}
