//! Save codec and on-disk persistence.
//!
//! `build_save_envelope` and `restore_from_envelope` are pure functions of
//! their inputs; `SaveManager` only moves the JSON text to and from disk.

mod envelope;
pub mod lenient;
mod manager;
mod restore;

pub use envelope::{
    build_save_envelope, CombatClockSave, EquipmentSave, InventorySave, PlayerStatsSave,
    ProgressSave, SaveEnvelope,
};
pub use manager::SaveManager;
pub use restore::{parse_envelope, restore_from_envelope, RestoreMeta, SaveError};
