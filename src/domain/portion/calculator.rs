//! Portion Calculator - proportional distribution of a consumed weight
//! across a recipe's ingredients.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{ConsistencyWarning, ConsumedIngredient, ConsumptionResult};
use crate::domain::foundation::weight::{
    approx_eq, ensure_positive_weight, round2, round3, MAX_CONSUMED_WEIGHT,
    PORTION_SUM_TOLERANCE, WEIGHT_EPSILON,
};
use crate::domain::foundation::ValidationError;
use crate::domain::recipe::{Recipe, RecipeError};

/// Bounds applied by the calculator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculatorLimits {
    /// Largest weight accepted for a single portion, in grams.
    pub max_consumed_weight: f64,
    /// Allowed drift between the portion sum and the consumed weight.
    pub drift_tolerance: f64,
}

impl Default for CalculatorLimits {
    fn default() -> Self {
        Self {
            max_consumed_weight: MAX_CONSUMED_WEIGHT,
            drift_tolerance: PORTION_SUM_TOLERANCE,
        }
    }
}

/// Aggregate view of a portion relative to its recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumptionSummary {
    pub recipe_name: String,
    pub consumed_weight: f64,
    pub ingredient_count: usize,
    /// Share of the whole recipe this portion represents.
    pub percentage_of_recipe: f64,
    /// Remaining weight once this portion is applied.
    pub remaining_after: f64,
    pub has_warning: bool,
}

/// Stateless portion calculations.
///
/// Nothing here mutates a recipe except [`PortionCalculator::update_remaining_weight`],
/// which callers use to apply a result they have already computed.
#[derive(Debug, Clone, Copy, Default)]
pub struct PortionCalculator {
    limits: CalculatorLimits,
}

impl PortionCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: CalculatorLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &CalculatorLimits {
        &self.limits
    }

    /// Splits `consumed_weight` across the recipe's ingredients in
    /// proportion to their weights.
    ///
    /// # Algorithm
    /// ```text
    /// actual = min(requested, remaining)
    /// for each ingredient i:
    ///     consumed_i = max(0, round2(round3(i.weight / total * actual)))
    /// ```
    /// Rounding happens twice on purpose: to 3 decimals first, then to 2.
    ///
    /// # Errors
    /// - recipe has no ingredients, a non-positive total, or a total that
    ///   disagrees with its ingredients
    /// - weight is non-finite, non-positive, above the limit, or more than
    ///   0.01g over the remaining weight
    /// - the recipe is already fully consumed
    pub fn calculate_portions(
        &self,
        recipe: &Recipe,
        consumed_weight: f64,
    ) -> Result<ConsumptionResult, ValidationError> {
        self.validate_recipe_for_calculation(recipe)?;
        self.validate_consumed_weight(consumed_weight)?;

        let remaining = recipe.remaining_weight();
        if consumed_weight > remaining + WEIGHT_EPSILON {
            return Err(ValidationError::ExceedsRemaining {
                requested: consumed_weight,
                remaining,
            });
        }
        if remaining <= 0.0 {
            return Err(ValidationError::AlreadyConsumed);
        }

        let actual = consumed_weight.min(remaining);
        let total = recipe.total_weight();

        let ingredients: Vec<ConsumedIngredient> = recipe
            .ingredients()
            .iter()
            .map(|ingredient| {
                let ratio = ingredient.weight() / total;
                let raw = ratio * actual;
                ConsumedIngredient {
                    name: ingredient.name().to_string(),
                    original_weight: ingredient.weight(),
                    consumed_weight: round2(round3(raw)).max(0.0),
                    barcode: ingredient.barcode().map(str::to_string),
                }
            })
            .collect();

        let warning = self.check_portion_sum(actual, &ingredients);
        if let Some(warning) = &warning {
            warn!(
                recipe = %recipe.name(),
                expected = warning.expected_weight,
                actual_sum = warning.actual_sum,
                "{}",
                warning.message()
            );
        }

        Ok(ConsumptionResult::new(
            *recipe.id(),
            recipe.name().to_string(),
            actual,
            ingredients,
            warning,
        ))
    }

    /// Applies a consumed weight to the recipe after re-validating it.
    pub fn update_remaining_weight(
        &self,
        recipe: &mut Recipe,
        consumed_weight: f64,
    ) -> Result<f64, RecipeError> {
        self.validate_consumed_weight(consumed_weight)?;
        recipe.consume(consumed_weight)
    }

    /// Portions for everything that is left of the recipe.
    pub fn consume_all(&self, recipe: &Recipe) -> Result<ConsumptionResult, ValidationError> {
        if recipe.remaining_weight() <= 0.0 {
            return Err(ValidationError::AlreadyConsumed);
        }
        self.calculate_portions(recipe, recipe.remaining_weight())
    }

    /// Share of the whole recipe that `consumed_weight` represents,
    /// clamped to 0-100 and rounded to 2 decimals.
    ///
    /// Depends only on the recipe's total, not on how much is left.
    pub fn calculate_consumption_percentage(&self, recipe: &Recipe, consumed_weight: f64) -> f64 {
        let total = recipe.total_weight();
        if total <= 0.0 || !consumed_weight.is_finite() {
            return 0.0;
        }
        round2((consumed_weight / total * 100.0).clamp(0.0, 100.0))
    }

    /// Checks the recipe is usable as a denominator.
    ///
    /// Recipes can be rebuilt from stored snapshots, so the total is
    /// cross-checked against the ingredients here rather than trusted.
    pub fn validate_recipe_for_calculation(&self, recipe: &Recipe) -> Result<(), ValidationError> {
        if recipe.ingredients().is_empty() {
            return Err(ValidationError::NoIngredients);
        }

        let total = recipe.total_weight();
        if !total.is_finite() || total <= 0.0 {
            return Err(ValidationError::InvalidTotalWeight { total });
        }

        let computed: f64 = recipe.ingredients().iter().map(|i| i.weight()).sum();
        if !approx_eq(computed, total, WEIGHT_EPSILON) {
            return Err(ValidationError::InconsistentTotal {
                recorded: total,
                computed: round2(computed),
            });
        }
        Ok(())
    }

    /// Summarizes a computed portion against its recipe.
    pub fn summarize(&self, recipe: &Recipe, result: &ConsumptionResult) -> ConsumptionSummary {
        ConsumptionSummary {
            recipe_name: result.recipe_name().to_string(),
            consumed_weight: result.consumed_weight(),
            ingredient_count: result.ingredients().len(),
            percentage_of_recipe: self
                .calculate_consumption_percentage(recipe, result.consumed_weight()),
            remaining_after: round2(recipe.remaining_weight() - result.consumed_weight()).max(0.0),
            has_warning: result.warning().is_some(),
        }
    }

    fn validate_consumed_weight(&self, consumed_weight: f64) -> Result<(), ValidationError> {
        ensure_positive_weight("consumed_weight", consumed_weight)?;
        if consumed_weight > self.limits.max_consumed_weight {
            return Err(ValidationError::above_limit(
                "consumed_weight",
                self.limits.max_consumed_weight,
                consumed_weight,
            ));
        }
        Ok(())
    }

    fn check_portion_sum(
        &self,
        expected: f64,
        ingredients: &[ConsumedIngredient],
    ) -> Option<ConsistencyWarning> {
        let actual_sum = round2(ingredients.iter().map(|i| i.consumed_weight).sum());
        let drift = round2((actual_sum - expected).abs());
        if drift > self.limits.drift_tolerance {
            Some(ConsistencyWarning {
                expected_weight: expected,
                actual_sum,
                drift,
                tolerance: self.limits.drift_tolerance,
            })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{RecipeId, Timestamp};
    use crate::domain::recipe::Ingredient;

    fn ingredient(name: &str, weight: f64) -> Ingredient {
        Ingredient::new(name, weight, None).unwrap()
    }

    fn soup() -> Recipe {
        Recipe::new(
            "Soup",
            vec![
                ingredient("Carrot", 100.0),
                ingredient("Potato", 200.0),
                ingredient("Stock", 300.0),
            ],
        )
        .unwrap()
    }

    fn calculator() -> PortionCalculator {
        PortionCalculator::new()
    }

    // Distribution tests

    #[test]
    fn soup_portion_splits_exactly() {
        let recipe = soup();
        let result = calculator().calculate_portions(&recipe, 60.0).unwrap();

        assert_eq!(result.recipe_name(), "Soup");
        assert_eq!(result.consumed_weight(), 60.0);
        assert_eq!(result.ingredient("Carrot").unwrap().consumed_weight, 10.0);
        assert_eq!(result.ingredient("Potato").unwrap().consumed_weight, 20.0);
        assert_eq!(result.ingredient("Stock").unwrap().consumed_weight, 30.0);
        assert!(result.warning().is_none());
    }

    #[test]
    fn calculate_portions_does_not_mutate_recipe() {
        let recipe = soup();
        calculator().calculate_portions(&recipe, 60.0).unwrap();
        assert_eq!(recipe.remaining_weight(), 600.0);
        assert!(recipe.last_consumed().is_none());
    }

    #[test]
    fn applying_portion_updates_remaining_weight() {
        let mut recipe = soup();
        let calc = calculator();
        let result = calc.calculate_portions(&recipe, 60.0).unwrap();
        calc.update_remaining_weight(&mut recipe, result.consumed_weight())
            .unwrap();
        assert_eq!(recipe.remaining_weight(), 540.0);
    }

    #[test]
    fn thirds_round_per_ingredient() {
        let recipe = Recipe::new(
            "Trio",
            vec![ingredient("A", 1.0), ingredient("B", 1.0), ingredient("C", 1.0)],
        )
        .unwrap();
        let result = calculator().calculate_portions(&recipe, 1.0).unwrap();
        for portion in result.ingredients() {
            assert_eq!(portion.consumed_weight, 0.33);
        }
        assert_eq!(result.ingredient_sum(), 0.99);
        assert!(result.warning().is_none());
    }

    #[test]
    fn two_stage_rounding_differs_from_single_rounding() {
        // 0.4449 rounds to 0.445 then 0.45; a single round2 would give 0.44.
        let recipe = Recipe::new(
            "Edge",
            vec![ingredient("A", 44.49), ingredient("B", 55.51)],
        )
        .unwrap();
        let result = calculator().calculate_portions(&recipe, 1.0).unwrap();
        assert_eq!(result.ingredient("A").unwrap().consumed_weight, 0.45);
    }

    #[test]
    fn request_within_tolerance_is_clamped_to_remaining() {
        let mut recipe = soup();
        recipe.consume(590.0).unwrap();
        let result = calculator().calculate_portions(&recipe, 10.005).unwrap();
        assert_eq!(result.consumed_weight(), 10.0);
    }

    #[test]
    fn many_small_ingredients_report_drift() {
        let ingredients = (0..40)
            .map(|i| ingredient(&format!("Spice {}", i), 1.0))
            .collect();
        let recipe = Recipe::new("Blend", ingredients).unwrap();
        // each share is 0.025 -> 0.03; 40 * 0.03 = 1.2 vs 1.0
        let result = calculator().calculate_portions(&recipe, 1.0).unwrap();
        let warning = result.warning().expect("drift should be reported");
        assert_eq!(warning.actual_sum, 1.2);
        assert_eq!(warning.expected_weight, 1.0);
    }

    // Precondition tests

    #[test]
    fn rejects_invalid_weights() {
        let recipe = soup();
        let calc = calculator();
        assert!(matches!(
            calc.calculate_portions(&recipe, 0.0),
            Err(ValidationError::NotPositive { .. })
        ));
        assert!(matches!(
            calc.calculate_portions(&recipe, f64::NAN),
            Err(ValidationError::NotFinite { .. })
        ));
        assert!(matches!(
            calc.calculate_portions(&recipe, 100_000.5),
            Err(ValidationError::AboveLimit { .. })
        ));
    }

    #[test]
    fn rejects_weight_beyond_remaining_tolerance() {
        let recipe = soup();
        assert!(matches!(
            calculator().calculate_portions(&recipe, 600.02),
            Err(ValidationError::ExceedsRemaining { .. })
        ));
    }

    #[test]
    fn rejects_fully_consumed_recipe() {
        let mut recipe = soup();
        recipe.consume_all();
        assert_eq!(
            calculator().calculate_portions(&recipe, 0.005),
            Err(ValidationError::AlreadyConsumed)
        );
        assert_eq!(
            calculator().consume_all(&recipe),
            Err(ValidationError::AlreadyConsumed)
        );
    }

    #[test]
    fn custom_limits_are_honored() {
        let calc = PortionCalculator::with_limits(CalculatorLimits {
            max_consumed_weight: 50.0,
            drift_tolerance: 0.1,
        });
        assert!(matches!(
            calc.calculate_portions(&soup(), 60.0),
            Err(ValidationError::AboveLimit { .. })
        ));
    }

    #[test]
    fn inconsistent_total_is_rejected() {
        let recipe = Recipe::reconstitute(
            RecipeId::new(),
            "Corrupt".to_string(),
            vec![ingredient("A", 100.0)],
            150.0,
            150.0,
            Timestamp::now(),
            None,
        );
        assert_eq!(
            calculator().validate_recipe_for_calculation(&recipe),
            Err(ValidationError::InconsistentTotal {
                recorded: 150.0,
                computed: 100.0
            })
        );
        assert!(calculator().calculate_portions(&recipe, 10.0).is_err());
    }

    #[test]
    fn empty_or_zero_total_recipe_is_rejected() {
        let empty = Recipe::reconstitute(
            RecipeId::new(),
            "Empty".to_string(),
            vec![],
            0.0,
            0.0,
            Timestamp::now(),
            None,
        );
        assert_eq!(
            calculator().validate_recipe_for_calculation(&empty),
            Err(ValidationError::NoIngredients)
        );

        let zero = Recipe::reconstitute(
            RecipeId::new(),
            "Zero".to_string(),
            vec![ingredient("A", 1.0)],
            0.0,
            0.0,
            Timestamp::now(),
            None,
        );
        assert!(matches!(
            calculator().validate_recipe_for_calculation(&zero),
            Err(ValidationError::InvalidTotalWeight { .. })
        ));
    }

    #[test]
    fn update_remaining_weight_revalidates() {
        let mut recipe = soup();
        let calc = calculator();
        assert!(calc.update_remaining_weight(&mut recipe, -3.0).is_err());
        assert!(calc.update_remaining_weight(&mut recipe, 700.0).is_err());
        assert_eq!(recipe.remaining_weight(), 600.0);
    }

    // Convenience tests

    #[test]
    fn consume_all_portions_the_remainder() {
        let mut recipe = soup();
        recipe.consume(300.0).unwrap();
        let result = calculator().consume_all(&recipe).unwrap();
        assert_eq!(result.consumed_weight(), 300.0);
        assert_eq!(result.ingredient("Stock").unwrap().consumed_weight, 150.0);
    }

    #[test]
    fn consumption_percentage_is_pure_and_clamped() {
        let mut recipe = soup();
        let calc = calculator();
        assert_eq!(calc.calculate_consumption_percentage(&recipe, 60.0), 10.0);
        assert_eq!(calc.calculate_consumption_percentage(&recipe, 200.0), 33.33);
        assert_eq!(calc.calculate_consumption_percentage(&recipe, 1200.0), 100.0);
        assert_eq!(calc.calculate_consumption_percentage(&recipe, -5.0), 0.0);

        recipe.consume(500.0).unwrap();
        assert_eq!(calc.calculate_consumption_percentage(&recipe, 60.0), 10.0);
    }

    #[test]
    fn summary_reports_remaining_after_portion() {
        let recipe = soup();
        let calc = calculator();
        let result = calc.calculate_portions(&recipe, 150.0).unwrap();
        let summary = calc.summarize(&recipe, &result);
        assert_eq!(summary.ingredient_count, 3);
        assert_eq!(summary.percentage_of_recipe, 25.0);
        assert_eq!(summary.remaining_after, 450.0);
        assert!(!summary.has_warning);
    }
}
