// ============================================================================
// Restaurant Orders - in-memory cart and order store for one session
// ============================================================================
//
// Layout:
// - domain:   menu catalog, cart, customer, order value objects and checkout
// - store:    the OrderStore, its commands, events and id/ETA strategies
// - tracking: four-phase order tracking timeline and its simulator
// - metrics:  Prometheus counters for store activity
// - config:   StoreConfig with environment overrides
//
// ============================================================================

pub mod config;
pub mod domain;
pub mod metrics;
pub mod store;
pub mod tracking;

pub use config::StoreConfig;
pub use domain::cart::{Cart, CartLine};
pub use domain::customer::{CustomerInfo, CustomerInfoUpdate};
pub use domain::menu::{Catalog, Category, MenuFilter, MenuItem, MenuItemId};
pub use domain::order::{Bill, Order, OrderId, OrderStatus, OrderType, Receipt};
pub use store::{OrderStore, StoreCommand, StoreError, StoreEvent};
pub use tracking::{TrackingSimulator, TrackingStep, TrackingTimeline};
