//! Simulation core of an idle auto-battle game.
//!
//! Every state transition takes a snapshot by reference and returns a new
//! one; callers own their snapshots and nothing here performs I/O except
//! [`save::SaveManager`].

pub mod combat;
pub mod content;
pub mod core;
pub mod items;
pub mod objectives;
pub mod save;
pub mod simulator;
pub mod zones;
