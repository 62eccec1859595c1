use super::value_objects::OrderId;

// ============================================================================
// Order Lookup and Checkout Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderError {
    #[error("Not a valid order id: {0:?}")]
    InvalidOrderId(String),

    #[error("Order not found: {0}")]
    NotFound(OrderId),
}

/// Reasons checkout refuses to place an order. State is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckoutError {
    #[error("Your cart is empty")]
    EmptyCart,

    #[error("Customer name is required")]
    MissingName,

    #[error("Customer phone is required")]
    MissingPhone,
}
