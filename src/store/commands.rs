use serde::{Deserialize, Serialize};

use super::errors::StoreError;
use super::order_store::OrderStore;
use crate::domain::customer::CustomerInfoUpdate;
use crate::domain::menu::{Catalog, MenuItemId};
use crate::domain::order::{Bill, Order, OrderId, OrderStatus, OrderType, Receipt};

// ============================================================================
// Store Commands - serializable user intent, replayed against a store
// ============================================================================
//
// Lets a session be scripted (JSON) and driven without a UI. Menu items are
// referenced by id and resolved through the catalog.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum StoreCommand {
    AddToCart { item_id: MenuItemId },
    RemoveFromCart { item_id: MenuItemId },
    UpdateQuantity { item_id: MenuItemId, quantity: i64 },
    ToggleCart,
    ClearCart,
    UpdateCustomerInfo(CustomerInfoUpdate),
    PlaceOrder,
    Checkout {
        #[serde(default)]
        order_type: OrderType,
    },
    UpdateOrderStatus { order_id: OrderId, status: OrderStatus },
}

/// What a command produced, beyond the state change itself
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    Applied,
    Placed(Order),
    CheckedOut(Receipt),
}

impl CommandOutcome {
    /// The order this command placed, with its bill when it went through checkout
    pub fn into_placed(self) -> Option<(Order, Option<Bill>)> {
        match self {
            CommandOutcome::Applied => None,
            CommandOutcome::Placed(order) => Some((order, None)),
            CommandOutcome::CheckedOut(Receipt { order, bill }) => Some((order, Some(bill))),
        }
    }
}

impl StoreCommand {
    pub fn name(&self) -> &'static str {
        match self {
            StoreCommand::AddToCart { .. } => "AddToCart",
            StoreCommand::RemoveFromCart { .. } => "RemoveFromCart",
            StoreCommand::UpdateQuantity { .. } => "UpdateQuantity",
            StoreCommand::ToggleCart => "ToggleCart",
            StoreCommand::ClearCart => "ClearCart",
            StoreCommand::UpdateCustomerInfo(_) => "UpdateCustomerInfo",
            StoreCommand::PlaceOrder => "PlaceOrder",
            StoreCommand::Checkout { .. } => "Checkout",
            StoreCommand::UpdateOrderStatus { .. } => "UpdateOrderStatus",
        }
    }

    pub fn execute(&self, store: &mut OrderStore, catalog: &Catalog) -> Result<CommandOutcome, StoreError> {
        tracing::debug!(command = self.name(), "Executing store command");

        match self {
            StoreCommand::AddToCart { item_id } => {
                let item = catalog.require(*item_id)?;
                store.add_to_cart(item);
            }
            StoreCommand::RemoveFromCart { item_id } => store.remove_from_cart(*item_id),
            StoreCommand::UpdateQuantity { item_id, quantity } => {
                store.update_quantity(*item_id, *quantity)
            }
            StoreCommand::ToggleCart => store.toggle_cart(),
            StoreCommand::ClearCart => store.clear_cart(),
            StoreCommand::UpdateCustomerInfo(update) => store.update_customer_info(update.clone()),
            StoreCommand::PlaceOrder => return Ok(CommandOutcome::Placed(store.place_order())),
            StoreCommand::Checkout { order_type } => {
                let receipt = store.checkout(*order_type)?;
                return Ok(CommandOutcome::CheckedOut(receipt));
            }
            StoreCommand::UpdateOrderStatus { order_id, status } => {
                store.update_order_status(*order_id, *status)
            }
        }

        Ok(CommandOutcome::Applied)
    }
}

/// Parse a JSON array of commands
pub fn parse_script(json: &str) -> Result<Vec<StoreCommand>, serde_json::Error> {
    serde_json::from_str(json)
}
