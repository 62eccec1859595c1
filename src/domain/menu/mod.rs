// ============================================================================
// Menu Domain - static catalog of dishes
// ============================================================================
//
// - Value objects (MenuItem, Category)
// - Catalog with lookup and menu-page filtering
// - Errors raised while loading a catalog
//
// ============================================================================

pub mod value_objects;
pub mod catalog;
pub mod errors;

pub use value_objects::*;
pub use catalog::*;
pub use errors::*;
