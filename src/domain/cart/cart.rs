use bigdecimal::BigDecimal;
use serde::Serialize;

use super::value_objects::CartLine;
use crate::domain::menu::{MenuItem, MenuItemId};

// ============================================================================
// Cart - ordered list of lines plus the running total
// ============================================================================
//
// Invariants:
// - at most one line per menu item id
// - every line has quantity >= 1
// - `total` equals the sum of line totals after every mutation
//
// ============================================================================

/// Outcome of a quantity change, so callers can tell what actually happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    Updated(u32),
    Removed,
    Unchanged,
}

#[derive(Debug, Clone, Serialize)]
pub struct Cart {
    lines: Vec<CartLine>,
    total: BigDecimal,
}

impl Default for Cart {
    fn default() -> Self {
        Self {
            lines: Vec::new(),
            total: BigDecimal::from(0),
        }
    }
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds exactly one unit, merging into an existing line. Returns the new quantity.
    pub fn add(&mut self, item: &MenuItem) -> u32 {
        let quantity = match self.lines.iter_mut().find(|line| line.id() == item.id) {
            Some(line) => {
                line.quantity = line.quantity.saturating_add(1);
                line.quantity
            }
            None => {
                self.lines.push(CartLine::new(item.clone()));
                1
            }
        };
        self.recalculate_total();
        quantity
    }

    /// Returns whether a line was removed
    pub fn remove(&mut self, id: MenuItemId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.id() != id);
        self.recalculate_total();
        self.lines.len() != before
    }

    /// Absolute quantity update; zero or negative removes the line
    pub fn set_quantity(&mut self, id: MenuItemId, quantity: i64) -> QuantityChange {
        if quantity <= 0 {
            return if self.remove(id) {
                QuantityChange::Removed
            } else {
                QuantityChange::Unchanged
            };
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        let change = match self.lines.iter_mut().find(|line| line.id() == id) {
            Some(line) if line.quantity != quantity => {
                line.quantity = quantity;
                QuantityChange::Updated(quantity)
            }
            _ => QuantityChange::Unchanged,
        };
        self.recalculate_total();
        change
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.total = BigDecimal::from(0);
    }

    /// Hands the lines over and leaves the cart empty
    pub fn take(&mut self) -> (Vec<CartLine>, BigDecimal) {
        let lines = std::mem::take(&mut self.lines);
        let total = std::mem::replace(&mut self.total, BigDecimal::from(0));
        (lines, total)
    }

    /// Sum of price x quantity over all lines
    pub fn calculate_total(&self) -> BigDecimal {
        self.lines
            .iter()
            .fold(BigDecimal::from(0), |acc, line| acc + line.line_total())
    }

    fn recalculate_total(&mut self) {
        self.total = self.calculate_total();
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn total(&self) -> &BigDecimal {
        &self.total
    }

    /// Number of units across all lines
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
