//! Card catalog: identifiers and static card data.
//!
//! ## Key Types
//!
//! - `CardId`: `(group, slot)` pair naming a card design
//! - `Catalog`: every existing card design plus per-group slot totals
//! - `CatalogConfig`: serializable catalog description

pub mod catalog;
pub mod identifier;

pub use catalog::{Catalog, CatalogConfig, GroupConfig};
pub use identifier::CardId;
