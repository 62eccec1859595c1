// ============================================================================
// Customer Domain - contact details captured at checkout
// ============================================================================

pub mod value_objects;

pub use value_objects::*;
