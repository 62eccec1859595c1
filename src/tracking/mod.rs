// ============================================================================
// Order Tracking - simulated progress after an order is placed
// ============================================================================

pub mod timeline;
pub mod simulator;

pub use timeline::*;
pub use simulator::*;
