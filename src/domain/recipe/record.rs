//! Plain persistence records for recipes.
//!
//! Records are what crosses the storage boundary. Decoding a record back
//! into a [`Recipe`] re-validates every field and returns a typed error, so
//! a corrupted snapshot never produces a panic or a half-built aggregate.
//! The stored total weight is kept as stored; cross-checking it against the
//! ingredient sum is left to the portion calculator.

use serde::{Deserialize, Serialize};

use super::aggregate::ensure_ingredients;
use super::ingredient::normalize_name;
use super::{Ingredient, Recipe, RecipeError};
use crate::domain::foundation::weight::WEIGHT_EPSILON;
use crate::domain::foundation::{RecipeId, Timestamp, ValidationError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientRecord {
    pub name: String,
    pub weight: f64,
    #[serde(default)]
    pub barcode: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRecord {
    pub id: String,
    pub name: String,
    pub ingredients: Vec<IngredientRecord>,
    pub total_weight: f64,
    pub remaining_weight: f64,
    pub created_at: Timestamp,
    #[serde(default)]
    pub last_consumed: Option<Timestamp>,
}

impl From<&Ingredient> for IngredientRecord {
    fn from(ingredient: &Ingredient) -> Self {
        Self {
            name: ingredient.name().to_string(),
            weight: ingredient.weight(),
            barcode: ingredient.barcode().map(str::to_string),
        }
    }
}

impl TryFrom<IngredientRecord> for Ingredient {
    type Error = ValidationError;

    fn try_from(record: IngredientRecord) -> Result<Self, Self::Error> {
        Ingredient::new(record.name, record.weight, record.barcode)
    }
}

impl From<&Recipe> for RecipeRecord {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id().to_string(),
            name: recipe.name().to_string(),
            ingredients: recipe.ingredients().iter().map(IngredientRecord::from).collect(),
            total_weight: recipe.total_weight(),
            remaining_weight: recipe.remaining_weight(),
            created_at: *recipe.created_at(),
            last_consumed: recipe.last_consumed().copied(),
        }
    }
}

impl TryFrom<RecipeRecord> for Recipe {
    type Error = RecipeError;

    fn try_from(record: RecipeRecord) -> Result<Self, Self::Error> {
        let id: RecipeId = record
            .id
            .parse()
            .map_err(|e: uuid::Error| ValidationError::invalid_format("id", e.to_string()))?;
        let name = normalize_name("name", &record.name)?;

        let ingredients = record
            .ingredients
            .into_iter()
            .map(Ingredient::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        ensure_ingredients(&ingredients)?;

        if !record.total_weight.is_finite() {
            return Err(ValidationError::not_finite("totalWeight").into());
        }
        if record.total_weight <= 0.0 {
            return Err(ValidationError::InvalidTotalWeight {
                total: record.total_weight,
            }
            .into());
        }

        let remaining = record.remaining_weight;
        if !remaining.is_finite() {
            return Err(ValidationError::not_finite("remainingWeight").into());
        }
        if remaining < 0.0 {
            return Err(
                ValidationError::invalid_format("remainingWeight", "must not be negative").into(),
            );
        }
        if remaining > record.total_weight + WEIGHT_EPSILON {
            return Err(
                ValidationError::above_limit("remainingWeight", record.total_weight, remaining)
                    .into(),
            );
        }

        Ok(Recipe::reconstitute(
            id,
            name,
            ingredients,
            record.total_weight,
            remaining,
            record.created_at,
            record.last_consumed,
        ))
    }
}

impl Recipe {
    /// Snapshot for persistence.
    pub fn to_record(&self) -> RecipeRecord {
        RecipeRecord::from(self)
    }

    /// Decode and validate a persisted snapshot.
    pub fn from_record(record: RecipeRecord) -> Result<Self, RecipeError> {
        Recipe::try_from(record)
    }
}
