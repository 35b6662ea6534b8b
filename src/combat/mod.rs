//! Combatants, skills, the combat log, and monster spawning.

pub mod combat_log;
pub mod skills;
pub mod spawn;
pub mod types;

pub use combat_log::*;
pub use skills::*;
pub use spawn::*;
pub use types::*;
