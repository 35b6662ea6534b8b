//! Content catalog: zones, monster templates, and item definitions.

mod catalog;
pub mod data;
mod types;

pub use catalog::{Catalog, CatalogError};
pub use types::{DropEntry, ItemDef, MonsterTemplate, ZoneDef};
