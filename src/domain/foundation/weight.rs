//! Gram weights: rounding helpers and tolerances shared by the recipe and
//! portion modules.

use super::ValidationError;

/// Floating-point slack allowed when comparing a requested weight against
/// the remaining weight of a recipe.
pub const WEIGHT_EPSILON: f64 = 0.01;

/// Maximum drift between the sum of per-ingredient portions and the consumed
/// weight before a consistency warning is raised.
pub const PORTION_SUM_TOLERANCE: f64 = 0.1;

/// Upper bound on a single consumed weight, in grams.
pub const MAX_CONSUMED_WEIGHT: f64 = 100_000.0;

/// Rounds to the given number of decimal places, half away from zero.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Rounds to 2 decimal places (centigrams).
pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

/// Rounds to 3 decimal places.
pub fn round3(value: f64) -> f64 {
    round_to(value, 3)
}

/// True when `a` and `b` differ by at most `tolerance`.
pub fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance
}

/// Validates a weight is finite and strictly positive.
pub fn ensure_positive_weight(field: &str, value: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::not_finite(field));
    }
    if value <= 0.0 {
        return Err(ValidationError::not_positive(field, value));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_rounds_half_up_for_positive_values() {
        assert_eq!(round2(1.005_000_1), 1.01);
        assert_eq!(round2(10.0), 10.0);
        assert_eq!(round2(33.333_333), 33.33);
    }

    #[test]
    fn round3_keeps_three_decimals() {
        assert_eq!(round3(0.123_49), 0.123);
        assert_eq!(round3(0.123_6), 0.124);
    }

    #[test]
    fn approx_eq_uses_inclusive_tolerance() {
        assert!(approx_eq(100.0, 100.01, 0.011));
        assert!(!approx_eq(100.0, 100.02, WEIGHT_EPSILON));
    }

    #[test]
    fn ensure_positive_weight_rejects_bad_values() {
        assert!(matches!(
            ensure_positive_weight("weight", f64::NAN),
            Err(ValidationError::NotFinite { .. })
        ));
        assert!(matches!(
            ensure_positive_weight("weight", f64::INFINITY),
            Err(ValidationError::NotFinite { .. })
        ));
        assert!(matches!(
            ensure_positive_weight("weight", 0.0),
            Err(ValidationError::NotPositive { .. })
        ));
        assert_eq!(ensure_positive_weight("weight", 2.5), Ok(2.5));
    }
}
