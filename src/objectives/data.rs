//! Static quest and achievement definitions.

use super::types::{Metric, ObjectiveDef, ObjectiveReward};

/// Daily quests, reset at local midnight.
pub const QUEST_DEFS: &[ObjectiveDef] = &[
    ObjectiveDef {
        id: "daily-equip-swap",
        name: "Gear Shuffle",
        metric: Metric::DailyEquipSwaps,
        target: 5,
        reward: ObjectiveReward { gold: 120, boxes: 1 },
    },
    ObjectiveDef {
        id: "daily-battle-win",
        name: "Daily Routine",
        metric: Metric::DailyBattleWins,
        target: 10,
        reward: ObjectiveReward { gold: 160, boxes: 1 },
    },
    ObjectiveDef {
        id: "daily-skill-trigger",
        name: "Combo Drills",
        metric: Metric::DailySkillTriggers,
        target: 8,
        reward: ObjectiveReward { gold: 140, boxes: 1 },
    },
];

/// Achievements, never reset.
pub const ACHIEVEMENT_DEFS: &[ObjectiveDef] = &[
    ObjectiveDef {
        id: "achv-first-rare-or-better",
        name: "Shiny Find",
        metric: Metric::RareOrBetterAcquired,
        target: 1,
        reward: ObjectiveReward { gold: 200, boxes: 1 },
    },
    ObjectiveDef {
        id: "achv-total-kills",
        name: "Centurion",
        metric: Metric::TotalKills,
        target: 100,
        reward: ObjectiveReward { gold: 300, boxes: 2 },
    },
    ObjectiveDef {
        id: "achv-total-skill-triggers",
        name: "Skill Mastery",
        metric: Metric::TotalSkillTriggers,
        target: 80,
        reward: ObjectiveReward { gold: 280, boxes: 2 },
    },
];

pub fn get_objective_def(id: &str) -> Option<&'static ObjectiveDef> {
    QUEST_DEFS
        .iter()
        .chain(ACHIEVEMENT_DEFS.iter())
        .find(|def| def.id == id)
}
