use bigdecimal::BigDecimal;
use std::collections::HashMap;

use super::errors::CatalogError;
use super::value_objects::{Category, MenuItem, MenuItemId, MAX_SPICE_LEVEL};

// ============================================================================
// Menu Catalog - immutable set of dishes loaded once per session
// ============================================================================

/// Filter applied by the menu page. Default matches every item.
#[derive(Debug, Clone, Default)]
pub struct MenuFilter {
    /// `None` means all categories
    pub category: Option<Category>,
    pub search: String,
    pub veg_only: bool,
}

impl MenuFilter {
    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    pub fn veg_only(mut self) -> Self {
        self.veg_only = true;
        self
    }

    pub fn matches(&self, item: &MenuItem) -> bool {
        let category_match = self.category.map_or(true, |c| item.category == c);
        let veg_match = !self.veg_only || item.is_veg;
        category_match && veg_match && item.matches_search(&self.search)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<MenuItem>,
    index: HashMap<MenuItemId, usize>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids and out-of-range values
    pub fn from_items(items: Vec<MenuItem>) -> Result<Self, CatalogError> {
        let zero = BigDecimal::from(0);
        let mut index = HashMap::with_capacity(items.len());

        for (pos, item) in items.iter().enumerate() {
            if item.spice_level > MAX_SPICE_LEVEL {
                return Err(CatalogError::InvalidSpiceLevel {
                    id: item.id,
                    level: item.spice_level,
                });
            }
            if item.price < zero {
                return Err(CatalogError::NegativePrice(item.id));
            }
            if index.insert(item.id, pos).is_some() {
                return Err(CatalogError::DuplicateId(item.id));
            }
        }

        tracing::debug!(items = items.len(), "Menu catalog loaded");

        Ok(Self { items, index })
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let items: Vec<MenuItem> = serde_json::from_str(json)?;
        Self::from_items(items)
    }

    pub fn get(&self, id: MenuItemId) -> Option<&MenuItem> {
        self.index.get(&id).map(|&pos| &self.items[pos])
    }

    /// Lookup that treats a missing id as an error
    pub fn require(&self, id: MenuItemId) -> Result<&MenuItem, CatalogError> {
        self.get(id).ok_or(CatalogError::UnknownItem(id))
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn popular(&self) -> impl Iterator<Item = &MenuItem> {
        self.items.iter().filter(|item| item.is_popular())
    }

    /// Items passing the filter, in catalog order
    pub fn filter(&self, filter: &MenuFilter) -> Vec<&MenuItem> {
        self.items.iter().filter(|item| filter.matches(item)).collect()
    }
}
