// ============================================================================
// Order Domain
// ============================================================================
//
// - Value objects (OrderId, OrderStatus, Order)
// - Checkout (validation, OrderType, Bill, Receipt)
// - Errors (OrderError, CheckoutError)
//
// Orders are created and mutated only by the store in src/store/.
//
// ============================================================================

pub mod value_objects;
pub mod checkout;
pub mod errors;

pub use value_objects::*;
pub use checkout::*;
pub use errors::*;
