//! Game state, the tick engine, and the state transitions around it.

pub mod actions;
pub mod constants;
pub mod game_state;
pub mod offline;
pub mod progression;
pub mod session;
pub mod tick;

pub use actions::*;
pub use game_state::*;
pub use offline::*;
pub use progression::*;
pub use session::*;
pub use tick::advance;
