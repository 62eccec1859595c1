use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use super::errors::CheckoutError;
use super::value_objects::Order;
use crate::config::StoreConfig;
use crate::domain::cart::Cart;
use crate::domain::customer::CustomerInfo;

// ============================================================================
// Checkout - validation and bill shown before an order is placed
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    #[default]
    Delivery,
    Pickup,
}

/// Checks run in order: cart, name, phone
pub fn validate(cart: &Cart, customer: &CustomerInfo) -> Result<(), CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    if !customer.has_name() {
        return Err(CheckoutError::MissingName);
    }
    if !customer.has_phone() {
        return Err(CheckoutError::MissingPhone);
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    pub order_type: OrderType,
    pub subtotal: BigDecimal,
    pub tax: BigDecimal,
    pub delivery_fee: BigDecimal,
    pub total: BigDecimal,
}

impl Bill {
    pub fn compute(subtotal: &BigDecimal, order_type: OrderType, config: &StoreConfig) -> Self {
        let tax = subtotal.clone() * config.tax_rate.clone();
        let delivery_fee = match order_type {
            OrderType::Delivery => config.delivery_fee.clone(),
            OrderType::Pickup => BigDecimal::from(0),
        };
        let total = subtotal.clone() + tax.clone() + delivery_fee.clone();

        Self {
            order_type,
            subtotal: subtotal.clone(),
            tax,
            delivery_fee,
            total,
        }
    }
}

/// What checkout hands back: the placed order and what the customer pays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub order: Order,
    pub bill: Bill,
}
