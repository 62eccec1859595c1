use super::value_objects::MenuItemId;

// ============================================================================
// Catalog Loading Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Catalog could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate menu item id: {0}")]
    DuplicateId(MenuItemId),

    #[error("Menu item {id} has spice level {level}, expected 0-3")]
    InvalidSpiceLevel { id: MenuItemId, level: u8 },

    #[error("Menu item {0} has a negative price")]
    NegativePrice(MenuItemId),

    #[error("Unknown menu item: {0}")]
    UnknownItem(MenuItemId),
}
