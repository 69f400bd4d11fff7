//! Recipe aggregate entity.
//!
//! A recipe owns its ingredient list and tracks how much of the prepared
//! weight is left. Remaining weight only changes through the consumption
//! operations below, or is clamped when the ingredient list shrinks.

use std::collections::HashSet;

use super::ingredient::{name_key, normalize_name};
use super::{Ingredient, RecipeError};
use crate::domain::foundation::weight::{
    approx_eq, ensure_positive_weight, round2, WEIGHT_EPSILON,
};
use crate::domain::foundation::{Percentage, RecipeId, Timestamp, ValidationError};

/// Recipe aggregate - a named collection of weighted ingredients.
///
/// # Invariants
///
/// - `name` is 1-100 characters, trimmed
/// - `ingredients` is non-empty with case-insensitively unique names
/// - `total_weight` is the rounded sum of ingredient weights
/// - `0 <= remaining_weight <= total_weight + 0.01`
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    id: RecipeId,
    name: String,
    ingredients: Vec<Ingredient>,
    total_weight: f64,
    remaining_weight: f64,
    created_at: Timestamp,
    last_consumed: Option<Timestamp>,
}

impl Recipe {
    /// Create a new, unconsumed recipe.
    ///
    /// # Errors
    ///
    /// - `Validation` if the name is invalid or no ingredients are given
    /// - `DuplicateIngredient` if two ingredients share a name
    pub fn new(name: impl AsRef<str>, ingredients: Vec<Ingredient>) -> Result<Self, RecipeError> {
        let name = normalize_name("name", name.as_ref())?;
        ensure_ingredients(&ingredients)?;

        let total_weight = sum_weights(&ingredients);
        Ok(Self {
            id: RecipeId::new(),
            name,
            ingredients,
            total_weight,
            remaining_weight: total_weight,
            created_at: Timestamp::now(),
            last_consumed: None,
        })
    }

    /// Reconstitute a recipe from persisted state (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: RecipeId,
        name: String,
        ingredients: Vec<Ingredient>,
        total_weight: f64,
        remaining_weight: f64,
        created_at: Timestamp,
        last_consumed: Option<Timestamp>,
    ) -> Self {
        Self {
            id,
            name,
            ingredients,
            total_weight,
            remaining_weight: non_negative(remaining_weight),
            created_at,
            last_consumed,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &RecipeId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Case-insensitive comparison key for the name.
    pub fn name_key(&self) -> String {
        name_key(&self.name)
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    /// Looks up an ingredient by name, ignoring case.
    pub fn ingredient(&self, name: &str) -> Option<&Ingredient> {
        let key = name_key(name);
        self.ingredients.iter().find(|i| i.name_key() == key)
    }

    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    pub fn remaining_weight(&self) -> f64 {
        self.remaining_weight
    }

    /// Weight consumed so far.
    pub fn consumed_weight(&self) -> f64 {
        round2((self.total_weight - self.remaining_weight).max(0.0))
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn last_consumed(&self) -> Option<&Timestamp> {
        self.last_consumed.as_ref()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Consumption state
    // ─────────────────────────────────────────────────────────────────────────

    /// Consume `amount` grams.
    ///
    /// Requests up to 0.01g above the remaining weight are accepted and
    /// clamped, since callers derive weights from floating-point division.
    /// Returns the weight actually removed.
    ///
    /// # Errors
    ///
    /// - `Validation` if the amount is non-finite, non-positive, or exceeds
    ///   the remaining weight beyond tolerance
    pub fn consume(&mut self, amount: f64) -> Result<f64, RecipeError> {
        ensure_positive_weight("consumed_weight", amount)?;
        if amount > self.remaining_weight + WEIGHT_EPSILON {
            return Err(ValidationError::ExceedsRemaining {
                requested: amount,
                remaining: self.remaining_weight,
            }
            .into());
        }

        let actual = amount.min(self.remaining_weight);
        self.remaining_weight = non_negative(round2(self.remaining_weight - actual));
        self.last_consumed = Some(Timestamp::now());
        Ok(actual)
    }

    /// Mark everything as eaten. Safe to call repeatedly.
    pub fn consume_all(&mut self) {
        self.remaining_weight = 0.0;
        self.last_consumed = Some(Timestamp::now());
    }

    /// Restore the recipe to its unconsumed state.
    pub fn reset_consumption(&mut self) {
        self.remaining_weight = self.total_weight;
        self.last_consumed = None;
    }

    pub fn is_fully_consumed(&self) -> bool {
        self.remaining_weight <= 0.0
    }

    /// Share of the recipe already consumed, rounded to a whole percent.
    pub fn consumption_percentage(&self) -> Percentage {
        if self.total_weight <= 0.0 {
            return Percentage::HUNDRED;
        }
        Percentage::from_ratio((self.total_weight - self.remaining_weight) / self.total_weight)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Rename the recipe, returning the previous name.
    pub fn rename(&mut self, new_name: impl AsRef<str>) -> Result<String, RecipeError> {
        let new_name = normalize_name("name", new_name.as_ref())?;
        Ok(std::mem::replace(&mut self.name, new_name))
    }

    /// Add an ingredient. Its weight is unconsumed, so it also adds to the
    /// remaining weight.
    ///
    /// # Errors
    ///
    /// - `DuplicateIngredient` if the name is already used
    pub fn add_ingredient(&mut self, ingredient: Ingredient) -> Result<(), RecipeError> {
        if self.ingredient(ingredient.name()).is_some() {
            return Err(RecipeError::DuplicateIngredient(ingredient.name().to_string()));
        }

        let added = ingredient.weight();
        self.ingredients.push(ingredient);
        self.total_weight = sum_weights(&self.ingredients);
        self.remaining_weight = round2(self.remaining_weight + added).min(self.total_weight);
        Ok(())
    }

    /// Remove an ingredient by name, returning it.
    ///
    /// Remaining weight is clamped to the new total.
    ///
    /// # Errors
    ///
    /// - `IngredientNotFound` if no ingredient has that name
    /// - `Validation` if it is the last ingredient
    pub fn remove_ingredient(&mut self, name: &str) -> Result<Ingredient, RecipeError> {
        let key = name_key(name);
        let position = self
            .ingredients
            .iter()
            .position(|i| i.name_key() == key)
            .ok_or_else(|| RecipeError::IngredientNotFound(name.trim().to_string()))?;

        if self.ingredients.len() == 1 {
            return Err(ValidationError::NoIngredients.into());
        }

        let removed = self.ingredients.remove(position);
        self.total_weight = sum_weights(&self.ingredients);
        self.remaining_weight = self.remaining_weight.min(self.total_weight);
        Ok(removed)
    }

    /// Replace the full ingredient list.
    ///
    /// An unconsumed recipe follows the new total; a partially consumed one
    /// keeps its remaining weight, clamped to the new total.
    pub fn replace_ingredients(&mut self, ingredients: Vec<Ingredient>) -> Result<(), RecipeError> {
        ensure_ingredients(&ingredients)?;

        let untouched = approx_eq(self.remaining_weight, self.total_weight, WEIGHT_EPSILON);
        self.ingredients = ingredients;
        self.total_weight = sum_weights(&self.ingredients);
        self.remaining_weight = if untouched {
            self.total_weight
        } else {
            self.remaining_weight.min(self.total_weight)
        };
        Ok(())
    }
}

/// Clamps to zero, turning `-0.0` into `0.0`.
fn non_negative(weight: f64) -> f64 {
    if weight > 0.0 {
        weight
    } else {
        0.0
    }
}

/// Rounded sum of ingredient weights.
pub(crate) fn sum_weights(ingredients: &[Ingredient]) -> f64 {
    round2(ingredients.iter().map(Ingredient::weight).sum())
}

/// Non-empty and case-insensitively unique.
pub(crate) fn ensure_ingredients(ingredients: &[Ingredient]) -> Result<(), RecipeError> {
    if ingredients.is_empty() {
        return Err(ValidationError::NoIngredients.into());
    }
    let mut seen = HashSet::with_capacity(ingredients.len());
    for ingredient in ingredients {
        if !seen.insert(ingredient.name_key()) {
            return Err(RecipeError::DuplicateIngredient(ingredient.name().to_string()));
        }
    }
    Ok(())
}
