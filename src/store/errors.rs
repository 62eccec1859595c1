use crate::domain::menu::CatalogError;
use crate::domain::order::{CheckoutError, OrderError};

// ============================================================================
// Store Command Errors
// ============================================================================
//
// The core cart/order operations never fail. These only surface from the
// command layer, checkout and order lookup.
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Checkout rejected: {0}")]
    Checkout(#[from] CheckoutError),

    #[error(transparent)]
    Order(#[from] OrderError),
}
