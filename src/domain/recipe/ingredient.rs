//! Ingredient entity.

use crate::domain::foundation::weight::{ensure_positive_weight, round2};
use crate::domain::foundation::ValidationError;

/// Maximum length for recipe and ingredient names, in characters.
pub const MAX_NAME_LENGTH: usize = 100;

/// A named component of a recipe with a fixed weight contribution.
///
/// # Invariants
///
/// - `name` is trimmed, 1-100 characters
/// - `weight` is finite, positive, and rounded to 2 decimals
/// - `barcode`, when present, is trimmed and non-empty
#[derive(Debug, Clone, PartialEq)]
pub struct Ingredient {
    name: String,
    weight: f64,
    barcode: Option<String>,
}

impl Ingredient {
    /// Creates a validated ingredient with normalized fields.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the name is blank or the barcode is an empty string
    /// - `TooLong` if the name exceeds 100 characters
    /// - `NotFinite` / `NotPositive` if the weight is unusable
    pub fn new(
        name: impl AsRef<str>,
        weight: f64,
        barcode: Option<String>,
    ) -> Result<Self, ValidationError> {
        let name = normalize_name("ingredient_name", name.as_ref())?;

        ensure_positive_weight("weight", weight)?;
        let weight = round2(weight);
        if weight <= 0.0 {
            return Err(ValidationError::not_positive("weight", weight));
        }

        let barcode = match barcode {
            Some(code) => {
                let code = code.trim();
                if code.is_empty() {
                    return Err(ValidationError::empty_field("barcode"));
                }
                Some(code.to_string())
            }
            None => None,
        };

        Ok(Self {
            name,
            weight,
            barcode,
        })
    }

    /// Returns the ingredient name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the weight in grams.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Returns the barcode, if any.
    pub fn barcode(&self) -> Option<&str> {
        self.barcode.as_deref()
    }

    /// Case-insensitive comparison key for the name.
    pub fn name_key(&self) -> String {
        name_key(&self.name)
    }
}

/// Trims and length-checks a display name.
pub(crate) fn normalize_name(field: &str, raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    let length = trimmed.chars().count();
    if length > MAX_NAME_LENGTH {
        return Err(ValidationError::too_long(field, MAX_NAME_LENGTH, length));
    }
    Ok(trimmed.to_string())
}

/// Key used for case-insensitive name uniqueness.
pub(crate) fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}
