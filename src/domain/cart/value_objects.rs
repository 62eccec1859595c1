use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::domain::menu::{MenuItem, MenuItemId};

// ============================================================================
// Cart Value Objects
// ============================================================================

/// A menu item plus the quantity requested. Serialized flat, the item's fields
/// sit next to `quantity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(flatten)]
    pub item: MenuItem,
    pub quantity: u32,
}

impl CartLine {
    pub fn new(item: MenuItem) -> Self {
        Self { item, quantity: 1 }
    }

    pub fn id(&self) -> MenuItemId {
        self.item.id
    }

    /// price x quantity
    pub fn line_total(&self) -> BigDecimal {
        self.item.price.clone() * BigDecimal::from(self.quantity)
    }
}
