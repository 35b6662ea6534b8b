//! Zone unlocking driven by difficulty level.
//!
//! Zone definitions live in the content catalog; this module only tracks
//! which of them the player has reached and where they are fighting.

mod progression;

pub use progression::{unlocked_zone_ids, ZoneProgression};
