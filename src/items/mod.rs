//! Item system: equipment types, slots, shop generation, drops, and inventory.

pub mod drops;
pub mod equipment;
pub mod generation;
pub mod inventory;
pub mod types;

pub use drops::*;
pub use equipment::*;
pub use generation::*;
pub use inventory::*;
pub use types::*;
