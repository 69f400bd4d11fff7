//! Application layer - services over the persistence port.
//!
//! This layer orchestrates domain operations and coordinates with the
//! `KeyValueStore` port:
//! - `RecipeRegistry` - recipe CRUD, consumption and history
//! - `ProductCatalog` - ingredient autocomplete

mod documents;
mod product_catalog;
mod recipe_registry;

pub use product_catalog::{CatalogError, ProductCatalog, PRODUCTS_KEY};
pub use recipe_registry::{RecipeRegistry, RecipeUpdate, HISTORY_KEY, RECIPES_KEY};
