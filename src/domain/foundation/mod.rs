//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, weight helpers, and error types
//! that form the vocabulary of the portion tracking domain.

mod errors;
mod ids;
mod percentage;
mod timestamp;
pub mod weight;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::RecipeId;
pub use percentage::Percentage;
pub use timestamp::Timestamp;
