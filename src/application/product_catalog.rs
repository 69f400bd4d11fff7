//! ProductCatalog - autocomplete over previously used ingredient names.
//!
//! The catalog is a convenience for entering recipes. The portion
//! calculator never reads it.

use std::cmp::Ordering;
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;

use super::documents::{decode_list, encode_list, ListDocument};
use crate::domain::catalog::Product;
use crate::domain::foundation::ValidationError;
use crate::domain::recipe::{name_key, Recipe};
use crate::ports::{KeyValueStore, StorageError};

/// Store key holding the product list.
pub const PRODUCTS_KEY: &str = "products";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Autocomplete catalog over a [`KeyValueStore`].
///
/// Products are stored least recently used first, so the stored order
/// breaks ties between equal timestamps.
pub struct ProductCatalog {
    store: Arc<dyn KeyValueStore>,
    write_lock: Mutex<()>,
}

impl ProductCatalog {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Records one use of a product, creating it on first use.
    pub async fn record_usage(
        &self,
        name: &str,
        barcode: Option<String>,
    ) -> Result<Product, CatalogError> {
        let _guard = self.write_lock.lock().await;
        let ListDocument {
            items: mut products,
            skipped,
        } = self.load_document().await?;

        let product = upsert(&mut products, name, barcode)?;
        self.save(&products, &skipped).await?;

        debug!(name = %product.name(), uses = product.usage_count(), "product usage recorded");
        Ok(product)
    }

    /// Records one use of every ingredient in the recipe.
    pub async fn record_recipe(&self, recipe: &Recipe) -> Result<(), CatalogError> {
        let _guard = self.write_lock.lock().await;
        let ListDocument {
            items: mut products,
            skipped,
        } = self.load_document().await?;

        for ingredient in recipe.ingredients() {
            upsert(
                &mut products,
                ingredient.name(),
                ingredient.barcode().map(str::to_string),
            )?;
        }
        self.save(&products, &skipped).await?;

        debug!(recipe = %recipe.name(), count = recipe.ingredients().len(), "recipe products recorded");
        Ok(())
    }

    /// Up to `limit` products matching `query`, ignoring case.
    ///
    /// Prefix matches come before substring matches. Within each group the
    /// most used products come first, then the most recently used. A blank
    /// query returns the most used products.
    pub async fn suggest(&self, query: &str, limit: usize) -> Result<Vec<Product>, CatalogError> {
        let needle = name_key(query);
        let mut products = self.load().await?;
        products.reverse();

        let mut ranked: Vec<(u8, Product)> = products
            .into_iter()
            .filter_map(|product| {
                let key = product.name_key();
                if key.starts_with(&needle) {
                    Some((0, product))
                } else if key.contains(&needle) {
                    Some((1, product))
                } else {
                    None
                }
            })
            .collect();

        ranked.sort_by(|(group_a, a), (group_b, b)| {
            group_a.cmp(group_b).then_with(|| by_usage(a, b))
        });

        Ok(ranked
            .into_iter()
            .take(limit)
            .map(|(_, product)| product)
            .collect())
    }

    pub async fn find_by_barcode(&self, barcode: &str) -> Result<Option<Product>, CatalogError> {
        let code = barcode.trim();
        if code.is_empty() {
            return Ok(None);
        }
        Ok(self
            .load()
            .await?
            .into_iter()
            .rev()
            .find(|p| p.barcode() == Some(code)))
    }

    /// Every product, sorted by name.
    pub async fn all(&self) -> Result<Vec<Product>, CatalogError> {
        let mut products = self.load().await?;
        products.sort_by_key(|p| p.name_key());
        Ok(products)
    }

    async fn load(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.load_document().await?.items)
    }

    async fn load_document(&self) -> Result<ListDocument<Product>, CatalogError> {
        let document = self.store.load(PRODUCTS_KEY).await?;
        Ok(decode_list(PRODUCTS_KEY, document)?)
    }

    async fn save(&self, products: &[Product], skipped: &[Value]) -> Result<(), CatalogError> {
        self.store
            .save(PRODUCTS_KEY, &encode_list(products, skipped)?)
            .await?;
        Ok(())
    }
}

/// Bumps an existing product or adds a new one, moving it to the end.
fn upsert(
    products: &mut Vec<Product>,
    name: &str,
    barcode: Option<String>,
) -> Result<Product, ValidationError> {
    let key = name_key(name);
    let product = match products.iter().position(|p| p.name_key() == key) {
        Some(index) => {
            let mut existing = products.remove(index);
            existing.record_use(barcode);
            existing
        }
        None => Product::new(name, barcode)?,
    };
    products.push(product.clone());
    Ok(product)
}

fn by_usage(a: &Product, b: &Product) -> Ordering {
    b.usage_count()
        .cmp(&a.usage_count())
        .then_with(|| b.last_used().cmp(a.last_used()))
}
