//! Daily quests and lifetime achievements driven by named metrics.
//!
//! Quests reset when the local calendar date changes; achievements never
//! reset. Rewards are claimed in bulk through `core::actions`.

pub mod data;
pub mod logic;
pub mod types;

pub use data::{get_objective_def, ACHIEVEMENT_DEFS, QUEST_DEFS};
pub use logic::date_key;
pub use types::{
    ClaimSummary, Metric, ObjectiveBook, ObjectiveDef, ObjectiveEntry, ObjectiveReward,
    ObjectiveState, ObjectiveStatus, QuestState,
};
