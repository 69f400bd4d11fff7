//! Property-based tests for proportional portion calculation.
//!
//! Recipes are generated with up to ten ingredients of 0.5g to 2kg each,
//! the range where rounding drift stays inside the 0.1g tolerance.

use proptest::prelude::*;

use portion_tracker::domain::foundation::ValidationError;
use portion_tracker::domain::portion::PortionCalculator;
use portion_tracker::domain::recipe::{Ingredient, Recipe, RecipeRecord};

/// Weights in whole centigrams, so generated values are already rounded.
fn weight_strategy() -> impl Strategy<Value = f64> {
    (50u32..200_000).prop_map(|centigrams| f64::from(centigrams) / 100.0)
}

fn recipe_strategy() -> impl Strategy<Value = Recipe> {
    prop::collection::vec(weight_strategy(), 1..=10).prop_map(|weights| {
        let ingredients = weights
            .iter()
            .enumerate()
            .map(|(i, w)| Ingredient::new(format!("ingredient-{}", i), *w, None).unwrap())
            .collect();
        Recipe::new("Generated", ingredients).unwrap()
    })
}

/// Property: the portions always add up to the consumed weight within 0.1g.
#[test]
fn prop_portion_sum_matches_consumed_weight() {
    proptest!(|(recipe in recipe_strategy(), fraction in 0.001f64..=1.0)| {
        let calculator = PortionCalculator::new();
        let weight = recipe.remaining_weight() * fraction;

        let result = calculator.calculate_portions(&recipe, weight).unwrap();

        prop_assert!((result.ingredient_sum() - result.consumed_weight()).abs() <= 0.1);
        prop_assert!(result.warning().is_none());
        prop_assert!(result.ingredients().iter().all(|i| i.consumed_weight >= 0.0));
    });
}

/// Property: each ingredient's portion is its share of the recipe, up to rounding.
#[test]
fn prop_portions_are_proportional() {
    proptest!(|(recipe in recipe_strategy(), fraction in 0.001f64..=1.0)| {
        let calculator = PortionCalculator::new();
        let weight = recipe.remaining_weight() * fraction;

        let result = calculator.calculate_portions(&recipe, weight).unwrap();

        prop_assert_eq!(result.ingredients().len(), recipe.ingredients().len());
        for (portion, ingredient) in result.ingredients().iter().zip(recipe.ingredients()) {
            let exact = ingredient.weight() / recipe.total_weight() * weight;
            prop_assert!(
                (portion.consumed_weight - exact).abs() <= 0.006,
                "{} got {} expected about {}",
                portion.name,
                portion.consumed_weight,
                exact
            );
            prop_assert_eq!(portion.original_weight, ingredient.weight());
        }
    });
}

/// Property: calculating portions never changes the recipe.
#[test]
fn prop_calculation_does_not_mutate() {
    proptest!(|(recipe in recipe_strategy(), fraction in 0.001f64..=1.0)| {
        let before = recipe.clone();
        let weight = recipe.remaining_weight() * fraction;

        PortionCalculator::new().calculate_portions(&recipe, weight).unwrap();

        prop_assert_eq!(recipe, before);
    });
}

/// Property: repeated consumption keeps 0 <= remaining <= total and accounts
/// for every gram removed.
#[test]
fn prop_remaining_weight_stays_in_range() {
    proptest!(|(
        mut recipe in recipe_strategy(),
        fractions in prop::collection::vec(0.01f64..=0.6, 1..8)
    )| {
        let calculator = PortionCalculator::new();
        let total = recipe.total_weight();
        let mut removed = 0.0;

        for fraction in fractions {
            if recipe.is_fully_consumed() {
                break;
            }
            let weight = (recipe.remaining_weight() * fraction).max(0.01);
            let result = calculator.calculate_portions(&recipe, weight).unwrap();
            removed += calculator
                .update_remaining_weight(&mut recipe, result.consumed_weight())
                .unwrap();

            prop_assert!(recipe.remaining_weight() >= 0.0);
            prop_assert!(recipe.remaining_weight() <= total + 0.01);
        }

        // Each step rounds remaining to 2 decimals.
        prop_assert!((total - recipe.remaining_weight() - removed).abs() <= 0.05);
    });
}

/// Property: consume_all is idempotent and leaves nothing to portion.
#[test]
fn prop_consume_all_is_idempotent() {
    proptest!(|(mut recipe in recipe_strategy())| {
        let calculator = PortionCalculator::new();
        let everything = calculator.consume_all(&recipe).unwrap();
        prop_assert_eq!(everything.consumed_weight(), recipe.total_weight());

        recipe.consume_all();
        recipe.consume_all();

        prop_assert!(recipe.is_fully_consumed());
        prop_assert_eq!(recipe.remaining_weight(), 0.0);
        prop_assert_eq!(recipe.consumption_percentage().value(), 100);
        prop_assert_eq!(
            calculator.consume_all(&recipe).unwrap_err(),
            ValidationError::AlreadyConsumed
        );
    });
}

/// Property: requests more than 0.01g over the remaining weight are
/// rejected; requests within it are clamped.
#[test]
fn prop_remaining_boundary() {
    proptest!(|(recipe in recipe_strategy())| {
        let calculator = PortionCalculator::new();
        let remaining = recipe.remaining_weight();

        let over = calculator.calculate_portions(&recipe, remaining + 0.02);
        let is_exceeds = matches!(over, Err(ValidationError::ExceedsRemaining { .. }));
        prop_assert!(is_exceeds);

        let within = calculator.calculate_portions(&recipe, remaining + 0.005).unwrap();
        prop_assert_eq!(within.consumed_weight(), remaining);
    });
}

/// Property: a partly consumed recipe survives the persistence record.
#[test]
fn prop_record_preserves_recipe_state() {
    proptest!(|(mut recipe in recipe_strategy(), fraction in 0.0f64..1.0)| {
        let weight = recipe.remaining_weight() * fraction;
        if weight > 0.0 {
            recipe.consume(weight).unwrap();
        }

        let json = serde_json::to_value(recipe.to_record()).unwrap();
        let record: RecipeRecord = serde_json::from_value(json).unwrap();
        let restored = Recipe::try_from(record).unwrap();

        prop_assert_eq!(restored, recipe);
    });
}
