//! Portion Tracker - recipe weights and proportional portion tracking
//!
//! Recipes are built from weighted ingredients. Eating a portion of a
//! recipe is split across its ingredients in proportion to their weights,
//! and the recipe keeps track of how much is left.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use portion_tracker::adapters::InMemoryStore;
//! use portion_tracker::application::RecipeRegistry;
//! use portion_tracker::domain::recipe::Ingredient;
//!
//! # async fn run() -> Result<(), portion_tracker::domain::recipe::RecipeError> {
//! let registry = RecipeRegistry::new(Arc::new(InMemoryStore::new()));
//! let soup = registry
//!     .create("Soup", vec![Ingredient::new("Carrot", 100.0, None)?])
//!     .await?;
//! let portion = registry.record_consumption(*soup.id(), 25.0).await?;
//! assert_eq!(portion.consumed_weight(), 25.0);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
