//! Headless balance simulator.
//!
//! Plays the live tick engine for a fixed span of time and sets the result
//! next to the offline estimate for the same span, so the two offline
//! strategies can be checked against real play.

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::{RunStats, SimReport};
pub use runner::{run_simulation, simulate_single_run};
