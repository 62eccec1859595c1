// ============================================================================
// Cart Domain - lines keyed by menu item id with a running total
// ============================================================================

pub mod value_objects;
pub mod cart;

pub use value_objects::*;
pub use cart::*;
