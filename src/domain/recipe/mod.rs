//! Recipe domain module.
//!
//! Recipes aggregate weighted ingredients and track how much of the prepared
//! weight remains as portions are eaten.

mod aggregate;
mod errors;
mod ingredient;
mod record;

pub use aggregate::Recipe;
pub use errors::RecipeError;
pub use ingredient::{Ingredient, MAX_NAME_LENGTH};
pub use record::{IngredientRecord, RecipeRecord};

pub(crate) use ingredient::{name_key, normalize_name};
