//! Recipe-specific error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, RecipeId, ValidationError};
use crate::ports::StorageError;

/// Errors raised by recipe operations and the registry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecipeError {
    /// Input failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No recipe with this id exists.
    #[error("Recipe not found: {0}")]
    NotFound(RecipeId),

    /// The recipe has no ingredient with this name.
    #[error("Ingredient '{0}' not found in recipe")]
    IngredientNotFound(String),

    /// Another recipe already uses this name.
    #[error("A recipe named '{0}' already exists")]
    DuplicateName(String),

    /// The ingredient name appears twice within one recipe.
    #[error("Ingredient '{0}' appears more than once in the recipe")]
    DuplicateIngredient(String),

    /// The persistence port failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl RecipeError {
    pub fn code(&self) -> ErrorCode {
        match self {
            RecipeError::Validation(_) => ErrorCode::ValidationFailed,
            RecipeError::NotFound(_) => ErrorCode::RecipeNotFound,
            RecipeError::IngredientNotFound(_) => ErrorCode::IngredientNotFound,
            RecipeError::DuplicateName(_) => ErrorCode::DuplicateRecipeName,
            RecipeError::DuplicateIngredient(_) => ErrorCode::DuplicateIngredientName,
            RecipeError::Storage(_) => ErrorCode::StorageError,
        }
    }

    /// True for duplicate-name conflicts.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            RecipeError::DuplicateName(_) | RecipeError::DuplicateIngredient(_)
        )
    }
}

impl From<RecipeError> for DomainError {
    fn from(err: RecipeError) -> Self {
        match err {
            RecipeError::Validation(inner) => inner.into(),
            RecipeError::NotFound(id) => {
                DomainError::new(ErrorCode::RecipeNotFound, format!("Recipe not found: {}", id))
                    .with_detail("recipe_id", id.to_string())
            }
            other => DomainError::new(other.code(), other.to_string()),
        }
    }
}
