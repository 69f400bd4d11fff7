//! Consumption result value objects.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::weight::round2;
use crate::domain::foundation::{RecipeId, Timestamp};
use crate::domain::recipe::name_key;

/// Per-ingredient share of a consumed portion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumedIngredient {
    pub name: String,
    pub original_weight: f64,
    pub consumed_weight: f64,
    pub barcode: Option<String>,
}

/// Soft signal that the per-ingredient portions do not add up to the
/// consumed weight. Never aborts a calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencyWarning {
    pub expected_weight: f64,
    pub actual_sum: f64,
    pub drift: f64,
    pub tolerance: f64,
}

impl ConsistencyWarning {
    pub fn message(&self) -> String {
        format!(
            "Ingredient portions sum to {}g but {}g was consumed (drift {}g exceeds {}g)",
            self.actual_sum, self.expected_weight, self.drift, self.tolerance
        )
    }
}

/// Outcome of a portion calculation. Immutable once built.
///
/// # Invariants
///
/// - `consumed_weight > 0`
/// - every ingredient `consumed_weight >= 0`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumptionResult {
    recipe_id: RecipeId,
    recipe_name: String,
    consumed_weight: f64,
    ingredients: Vec<ConsumedIngredient>,
    timestamp: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    warning: Option<ConsistencyWarning>,
}

impl ConsumptionResult {
    pub(crate) fn new(
        recipe_id: RecipeId,
        recipe_name: String,
        consumed_weight: f64,
        ingredients: Vec<ConsumedIngredient>,
        warning: Option<ConsistencyWarning>,
    ) -> Self {
        Self {
            recipe_id,
            recipe_name,
            consumed_weight,
            ingredients,
            timestamp: Timestamp::now(),
            warning,
        }
    }

    pub fn recipe_id(&self) -> &RecipeId {
        &self.recipe_id
    }

    pub fn recipe_name(&self) -> &str {
        &self.recipe_name
    }

    /// Weight actually consumed (after clamping to the remaining weight).
    pub fn consumed_weight(&self) -> f64 {
        self.consumed_weight
    }

    pub fn ingredients(&self) -> &[ConsumedIngredient] {
        &self.ingredients
    }

    /// Finds an ingredient's share by name, ignoring case.
    pub fn ingredient(&self, name: &str) -> Option<&ConsumedIngredient> {
        let key = name_key(name);
        self.ingredients.iter().find(|i| name_key(&i.name) == key)
    }

    pub fn timestamp(&self) -> &Timestamp {
        &self.timestamp
    }

    /// Drift diagnostic, present only when the portions failed the sum check.
    pub fn warning(&self) -> Option<&ConsistencyWarning> {
        self.warning.as_ref()
    }

    /// Rounded sum of the per-ingredient portions.
    pub fn ingredient_sum(&self) -> f64 {
        round2(self.ingredients.iter().map(|i| i.consumed_weight).sum())
    }
}
