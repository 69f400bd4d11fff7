//! Percentage value object (0-100 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A whole-number value between 0 and 100 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percentage(u8);

impl Percentage {
    /// Zero percent.
    pub const ZERO: Self = Self(0);

    /// One hundred percent.
    pub const HUNDRED: Self = Self(100);

    /// Creates a new Percentage, clamping to valid range.
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    /// Builds a percentage from a ratio, rounding to the nearest whole percent.
    ///
    /// Non-finite ratios map to 100.
    pub fn from_ratio(ratio: f64) -> Self {
        if !ratio.is_finite() {
            return Self::HUNDRED;
        }
        let pct = (ratio * 100.0).round().clamp(0.0, 100.0);
        Self(pct as u8)
    }

    /// Returns the value as u8.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Returns the value as a fraction (0.0 to 1.0).
    pub fn as_fraction(&self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl Default for Percentage {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_new_clamps_to_100() {
        assert_eq!(Percentage::new(50).value(), 50);
        assert_eq!(Percentage::new(101).value(), 100);
    }

    #[test]
    fn from_ratio_rounds_to_whole_percent() {
        assert_eq!(Percentage::from_ratio(0.1).value(), 10);
        assert_eq!(Percentage::from_ratio(0.333).value(), 33);
        assert_eq!(Percentage::from_ratio(0.999).value(), 100);
        assert_eq!(Percentage::from_ratio(0.75).value(), 75);
    }

    #[test]
    fn from_ratio_clamps_out_of_range() {
        assert_eq!(Percentage::from_ratio(-0.5), Percentage::ZERO);
        assert_eq!(Percentage::from_ratio(3.0), Percentage::HUNDRED);
        assert_eq!(Percentage::from_ratio(f64::NAN), Percentage::HUNDRED);
    }

    #[test]
    fn percentage_displays_correctly() {
        assert_eq!(format!("{}", Percentage::new(75)), "75%");
        assert!((Percentage::new(50).as_fraction() - 0.5).abs() < f64::EPSILON);
    }
}
