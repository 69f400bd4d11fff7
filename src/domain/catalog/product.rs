//! Product entity - remembered ingredient names for autocomplete.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, ValidationError};
use crate::domain::recipe::{name_key, normalize_name, Ingredient};

/// A product the user has entered before, ranked by how often it is used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    name: String,
    #[serde(default)]
    barcode: Option<String>,
    usage_count: u32,
    last_used: Timestamp,
}

impl Product {
    /// Creates a product with a usage count of one.
    pub fn new(name: impl AsRef<str>, barcode: Option<String>) -> Result<Self, ValidationError> {
        let name = normalize_name("product_name", name.as_ref())?;

        Ok(Self {
            name,
            barcode: normalize_barcode(barcode),
            usage_count: 1,
            last_used: Timestamp::now(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn name_key(&self) -> String {
        name_key(&self.name)
    }

    pub fn barcode(&self) -> Option<&str> {
        self.barcode.as_deref()
    }

    pub fn usage_count(&self) -> u32 {
        self.usage_count
    }

    pub fn last_used(&self) -> &Timestamp {
        &self.last_used
    }

    /// Bumps the usage counter. A newly seen barcode replaces the old one.
    pub fn record_use(&mut self, barcode: Option<String>) {
        self.usage_count = self.usage_count.saturating_add(1);
        self.last_used = Timestamp::now();
        if let Some(code) = normalize_barcode(barcode) {
            self.barcode = Some(code);
        }
    }
}

impl TryFrom<&Ingredient> for Product {
    type Error = ValidationError;

    fn try_from(ingredient: &Ingredient) -> Result<Self, Self::Error> {
        Product::new(ingredient.name(), ingredient.barcode().map(str::to_string))
    }
}

fn normalize_barcode(barcode: Option<String>) -> Option<String> {
    barcode
        .map(|code| code.trim().to_string())
        .filter(|code| !code.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_product_starts_with_one_use() {
        let product = Product::new(" Oat Milk ", None).unwrap();
        assert_eq!(product.name(), "Oat Milk");
        assert_eq!(product.usage_count(), 1);
    }

    #[test]
    fn blank_product_name_is_rejected() {
        assert!(Product::new("  ", None).is_err());
    }

    #[test]
    fn record_use_increments_and_keeps_barcode() {
        let mut product = Product::new("Oats", Some("111".to_string())).unwrap();
        product.record_use(None);
        assert_eq!(product.usage_count(), 2);
        assert_eq!(product.barcode(), Some("111"));

        product.record_use(Some(" 222 ".to_string()));
        assert_eq!(product.barcode(), Some("222"));
    }

    #[test]
    fn blank_barcode_is_dropped() {
        let product = Product::new("Oats", Some("   ".to_string())).unwrap();
        assert_eq!(product.barcode(), None);
    }

    #[test]
    fn product_from_ingredient_copies_barcode() {
        let ingredient = Ingredient::new("Stock", 300.0, Some("999".to_string())).unwrap();
        let product = Product::try_from(&ingredient).unwrap();
        assert_eq!(product.name(), "Stock");
        assert_eq!(product.barcode(), Some("999"));
    }
}
