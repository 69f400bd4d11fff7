//! RecipeRegistry - the authoritative collection of recipes.
//!
//! The whole collection lives under one store key. Every mutation loads the
//! collection, changes it in memory, and saves it back while holding the
//! registry's write lock, so concurrent callers cannot lose each other's
//! updates. Reads take no lock.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::documents::{decode_list, decode_list_with, encode_list, ListDocument};
use crate::config::PortionConfig;
use crate::domain::foundation::RecipeId;
use crate::domain::portion::{ConsumptionResult, PortionCalculator};
use crate::domain::recipe::{name_key, Ingredient, Recipe, RecipeError, RecipeRecord};
use crate::ports::KeyValueStore;

/// Store key holding the recipe list.
pub const RECIPES_KEY: &str = "recipes";

/// Store key holding recorded consumptions, newest first.
pub const HISTORY_KEY: &str = "consumption_history";

const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Changes applied by [`RecipeRegistry::update`]. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeUpdate {
    pub name: Option<String>,
    pub ingredients: Option<Vec<Ingredient>>,
}

impl RecipeUpdate {
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ingredients: None,
        }
    }

    pub fn ingredients(ingredients: Vec<Ingredient>) -> Self {
        Self {
            name: None,
            ingredients: Some(ingredients),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.ingredients.is_none()
    }
}

/// Recipe collection service over a [`KeyValueStore`].
pub struct RecipeRegistry {
    store: Arc<dyn KeyValueStore>,
    calculator: PortionCalculator,
    history_limit: usize,
    write_lock: Mutex<()>,
}

impl RecipeRegistry {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            calculator: PortionCalculator::new(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            write_lock: Mutex::new(()),
        }
    }

    pub fn from_config(store: Arc<dyn KeyValueStore>, config: &PortionConfig) -> Self {
        Self {
            store,
            calculator: PortionCalculator::with_limits(config.calculator_limits()),
            history_limit: config.history_limit.max(1),
            write_lock: Mutex::new(()),
        }
    }

    pub fn calculator(&self) -> &PortionCalculator {
        &self.calculator
    }

    pub fn history_limit(&self) -> usize {
        self.history_limit
    }

    // ───────────────────────────────────────────────────────────────
    // Commands
    // ───────────────────────────────────────────────────────────────

    /// Creates and stores a new recipe.
    ///
    /// # Errors
    /// - `Validation` for a bad name or an empty ingredient list
    /// - `DuplicateIngredient` if two ingredients share a name
    /// - `DuplicateName` if another recipe already uses the name
    pub async fn create(
        &self,
        name: &str,
        ingredients: Vec<Ingredient>,
    ) -> Result<Recipe, RecipeError> {
        let recipe = Recipe::new(name, ingredients)?;

        let _guard = self.write_lock.lock().await;
        let ListDocument {
            items: mut recipes,
            skipped,
        } = self.load_document().await?;
        ensure_unique_name(&recipes, recipe.name(), None)?;

        recipes.push(recipe.clone());
        self.save_recipes(&recipes, &skipped).await?;

        info!(
            recipe_id = %recipe.id(),
            name = %recipe.name(),
            total_weight = recipe.total_weight(),
            "recipe created"
        );
        Ok(recipe)
    }

    /// Renames a recipe and/or replaces its ingredients.
    ///
    /// Nothing is saved unless every requested change validates.
    pub async fn update(&self, id: RecipeId, changes: RecipeUpdate) -> Result<Recipe, RecipeError> {
        let _guard = self.write_lock.lock().await;
        let ListDocument {
            items: mut recipes,
            skipped,
        } = self.load_document().await?;
        let index = position_of(&recipes, id)?;

        if changes.is_empty() {
            return Ok(recipes[index].clone());
        }

        // 1. Apply changes to a copy
        let mut updated = recipes[index].clone();
        if let Some(name) = &changes.name {
            let new_name = name.trim();
            ensure_unique_name(&recipes, new_name, Some(id))?;
            updated.rename(new_name)?;
        }
        if let Some(ingredients) = changes.ingredients {
            updated.replace_ingredients(ingredients)?;
        }

        // 2. Swap in and persist
        recipes[index] = updated.clone();
        self.save_recipes(&recipes, &skipped).await?;

        info!(recipe_id = %id, name = %updated.name(), "recipe updated");
        Ok(updated)
    }

    /// Removes a recipe, returning it.
    pub async fn delete(&self, id: RecipeId) -> Result<Recipe, RecipeError> {
        let _guard = self.write_lock.lock().await;
        let ListDocument {
            items: mut recipes,
            skipped,
        } = self.load_document().await?;
        let index = position_of(&recipes, id)?;

        let removed = recipes.remove(index);
        self.save_recipes(&recipes, &skipped).await?;

        info!(recipe_id = %id, name = %removed.name(), "recipe deleted");
        Ok(removed)
    }

    /// Splits `weight` across the recipe's ingredients, applies it to the
    /// remaining weight, and appends the result to the history.
    pub async fn record_consumption(
        &self,
        id: RecipeId,
        weight: f64,
    ) -> Result<ConsumptionResult, RecipeError> {
        let _guard = self.write_lock.lock().await;
        let ListDocument {
            items: mut recipes,
            skipped,
        } = self.load_document().await?;
        let index = position_of(&recipes, id)?;

        // 1. Compute portions against the stored state
        let result = self.calculator.calculate_portions(&recipes[index], weight)?;

        // 2. Apply the actual consumed weight
        let mut updated = recipes[index].clone();
        self.calculator
            .update_remaining_weight(&mut updated, result.consumed_weight())?;
        recipes[index] = updated;

        // 3. Prepare the history entry before anything is written
        let history = self.history_with(&result).await?;

        // 4. Persist recipe state. A failed history write is logged only.
        self.save_recipes(&recipes, &skipped).await?;
        if let Err(e) = self.store.save(HISTORY_KEY, &history).await {
            warn!(recipe_id = %id, error = %e, "consumption recorded without history entry");
        }

        info!(
            recipe_id = %id,
            consumed = result.consumed_weight(),
            remaining = recipes[index].remaining_weight(),
            "consumption recorded"
        );
        Ok(result)
    }

    /// Sets the remaining weight to zero. Already finished recipes are
    /// returned unchanged.
    pub async fn mark_as_fully_consumed(&self, id: RecipeId) -> Result<Recipe, RecipeError> {
        let _guard = self.write_lock.lock().await;
        let ListDocument {
            items: mut recipes,
            skipped,
        } = self.load_document().await?;
        let index = position_of(&recipes, id)?;

        if recipes[index].is_fully_consumed() {
            return Ok(recipes[index].clone());
        }

        recipes[index].consume_all();
        self.save_recipes(&recipes, &skipped).await?;

        info!(recipe_id = %id, "recipe marked as fully consumed");
        Ok(recipes[index].clone())
    }

    /// Restores the remaining weight to the total.
    pub async fn reset_consumption(&self, id: RecipeId) -> Result<Recipe, RecipeError> {
        let _guard = self.write_lock.lock().await;
        let ListDocument {
            items: mut recipes,
            skipped,
        } = self.load_document().await?;
        let index = position_of(&recipes, id)?;

        recipes[index].reset_consumption();
        self.save_recipes(&recipes, &skipped).await?;

        info!(recipe_id = %id, "consumption reset");
        Ok(recipes[index].clone())
    }

    pub async fn clear_history(&self) -> Result<(), RecipeError> {
        let _guard = self.write_lock.lock().await;
        self.store.delete(HISTORY_KEY).await?;
        info!("consumption history cleared");
        Ok(())
    }

    // ───────────────────────────────────────────────────────────────
    // Queries
    // ───────────────────────────────────────────────────────────────

    pub async fn get_by_id(&self, id: RecipeId) -> Result<Recipe, RecipeError> {
        self.load_recipes()
            .await?
            .into_iter()
            .find(|r| *r.id() == id)
            .ok_or(RecipeError::NotFound(id))
    }

    /// All recipes, newest first.
    pub async fn get_all(&self) -> Result<Vec<Recipe>, RecipeError> {
        let recipes = self.load_recipes().await?;
        Ok(newest_first(recipes))
    }

    /// Recipes whose name or any ingredient name contains `query`,
    /// ignoring case, sorted by name. A blank query matches everything.
    pub async fn search(&self, query: &str) -> Result<Vec<Recipe>, RecipeError> {
        let needle = name_key(query);
        let mut matches: Vec<Recipe> = self
            .load_recipes()
            .await?
            .into_iter()
            .filter(|recipe| {
                needle.is_empty()
                    || recipe.name_key().contains(&needle)
                    || recipe
                        .ingredients()
                        .iter()
                        .any(|i| i.name_key().contains(&needle))
            })
            .collect();

        matches.sort_by_key(|r| r.name_key());
        Ok(matches)
    }

    /// Recipes with weight left, newest first.
    pub async fn get_active(&self) -> Result<Vec<Recipe>, RecipeError> {
        let recipes = self.get_all().await?;
        Ok(recipes.into_iter().filter(|r| !r.is_fully_consumed()).collect())
    }

    /// Fully consumed recipes, newest first.
    pub async fn get_completed(&self) -> Result<Vec<Recipe>, RecipeError> {
        let recipes = self.get_all().await?;
        Ok(recipes.into_iter().filter(|r| r.is_fully_consumed()).collect())
    }

    /// Portions for `weight` without changing the recipe.
    pub async fn preview_portions(
        &self,
        id: RecipeId,
        weight: f64,
    ) -> Result<ConsumptionResult, RecipeError> {
        let recipe = self.get_by_id(id).await?;
        Ok(self.calculator.calculate_portions(&recipe, weight)?)
    }

    /// Recorded consumptions, newest first.
    pub async fn consumption_history(&self) -> Result<Vec<ConsumptionResult>, RecipeError> {
        let document = self.store.load(HISTORY_KEY).await?;
        Ok(decode_list(HISTORY_KEY, document)?.items)
    }

    // ───────────────────────────────────────────────────────────────
    // Persistence
    // ───────────────────────────────────────────────────────────────

    async fn load_recipes(&self) -> Result<Vec<Recipe>, RecipeError> {
        Ok(self.load_document().await?.items)
    }

    /// Loads the recipe list. Entries that fail to decode or validate are
    /// kept raw so the next save writes them back unchanged.
    async fn load_document(&self) -> Result<ListDocument<Recipe>, RecipeError> {
        let document = self.store.load(RECIPES_KEY).await?;
        let decoded = decode_list_with(RECIPES_KEY, document, |entry| {
            let record: RecipeRecord =
                serde_json::from_value(entry).map_err(|e| e.to_string())?;
            Recipe::try_from(record).map_err(|e| e.to_string())
        })?;

        debug!(
            count = decoded.items.len(),
            skipped = decoded.skipped.len(),
            "recipes loaded"
        );
        Ok(decoded)
    }

    async fn save_recipes(&self, recipes: &[Recipe], skipped: &[Value]) -> Result<(), RecipeError> {
        let records: Vec<RecipeRecord> = recipes.iter().map(Recipe::to_record).collect();
        self.store
            .save(RECIPES_KEY, &encode_list(&records, skipped)?)
            .await?;
        debug!(count = records.len(), "recipes saved");
        Ok(())
    }

    /// The history document with `result` prepended and the list capped.
    async fn history_with(&self, result: &ConsumptionResult) -> Result<Value, RecipeError> {
        let document = self.store.load(HISTORY_KEY).await?;
        let mut history: ListDocument<ConsumptionResult> = decode_list(HISTORY_KEY, document)?;
        history.items.insert(0, result.clone());
        history.items.truncate(self.history_limit);
        Ok(encode_list(&history.items, &history.skipped)?)
    }
}

fn position_of(recipes: &[Recipe], id: RecipeId) -> Result<usize, RecipeError> {
    recipes
        .iter()
        .position(|r| *r.id() == id)
        .ok_or(RecipeError::NotFound(id))
}

fn ensure_unique_name(
    recipes: &[Recipe],
    name: &str,
    except: Option<RecipeId>,
) -> Result<(), RecipeError> {
    let key = name_key(name);
    let taken = recipes
        .iter()
        .any(|r| Some(*r.id()) != except && r.name_key() == key);
    if taken {
        return Err(RecipeError::DuplicateName(name.trim().to_string()));
    }
    Ok(())
}

/// Stored order is creation order, so reversing first keeps equal
/// timestamps newest first after the stable sort.
fn newest_first(mut recipes: Vec<Recipe>) -> Vec<Recipe> {
    recipes.reverse();
    recipes.sort_by(|a, b| b.created_at().cmp(a.created_at()));
    recipes
}
