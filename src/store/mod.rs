// ============================================================================
// Store - the session's state container
// ============================================================================
//
// - OrderStore: cart, customer draft, placed orders
// - Commands: serializable operations replayed against a store
// - Events: envelopes delivered to subscribers after each change
// - Strategies: order id and ETA generation
//
// ============================================================================

pub mod order_store;
pub mod commands;
pub mod events;
pub mod strategy;
pub mod errors;

pub use order_store::*;
pub use commands::*;
pub use events::*;
pub use strategy::*;
pub use errors::*;
