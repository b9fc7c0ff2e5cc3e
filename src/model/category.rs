//! The category registry: a static mapping from category key to display
//! metadata.
//!
//! Consulted by the ledger when validating a new record, and by consumers
//! rendering records. Effectively immutable configuration; there is no
//! lifecycle beyond construction.

use serde::{Deserialize, Serialize};

/// Display metadata for one transaction category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Stable key stored on transaction records.
    pub key: String,
    /// Human-readable name.
    pub name: String,
    /// Icon token for the presentation layer.
    pub icon: String,
}

impl Category {
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            icon: icon.into(),
        }
    }
}

/// The set of categories a ledger accepts, keyed by `Category::key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRegistry {
    categories: Vec<Category>,
}

impl CategoryRegistry {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// The built-in category set.
    pub fn builtin() -> Self {
        Self::new(vec![
            Category::new("purchases", "Purchases", "shopping-bag"),
            Category::new("food", "Food", "coffee"),
            Category::new("salary", "Salary", "dollar-sign"),
            Category::new("car", "Car", "crosshair"),
            Category::new("leisure", "Leisure", "heart"),
            Category::new("studies", "Studies", "book"),
            Category::new("housing", "Housing", "home"),
        ])
    }

    pub fn get(&self, key: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
