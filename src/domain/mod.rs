//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, weights, errors)
//! - `recipe` - Recipe aggregate, ingredients, and persistence records
//! - `portion` - Pure portion calculation services
//! - `catalog` - Products remembered for autocomplete

pub mod catalog;
pub mod foundation;
pub mod portion;
pub mod recipe;
