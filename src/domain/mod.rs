// ============================================================================
// Domain Layer
// ============================================================================
//
// Plain data and the rules that belong to it. Nothing here owns session
// state; the store in src/store/ does.
//
// ============================================================================

pub mod menu;
pub mod cart;
pub mod customer;
pub mod order;
