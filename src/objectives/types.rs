//! Objective tracker types: daily quests and persistent achievements.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::data::{ACHIEVEMENT_DEFS, QUEST_DEFS};

/// Named counters that drive objective progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    DailyEquipSwaps,
    DailyBattleWins,
    DailySkillTriggers,
    RareOrBetterAcquired,
    TotalKills,
    TotalSkillTriggers,
}

impl Metric {
    pub const ALL: [Metric; 6] = [
        Metric::DailyEquipSwaps,
        Metric::DailyBattleWins,
        Metric::DailySkillTriggers,
        Metric::RareOrBetterAcquired,
        Metric::TotalKills,
        Metric::TotalSkillTriggers,
    ];

    /// Key used in save files.
    pub fn key(&self) -> &'static str {
        match self {
            Metric::DailyEquipSwaps => "dailyEquipSwaps",
            Metric::DailyBattleWins => "dailyBattleWins",
            Metric::DailySkillTriggers => "dailySkillTriggers",
            Metric::RareOrBetterAcquired => "rareOrBetterAcquired",
            Metric::TotalKills => "totalKills",
            Metric::TotalSkillTriggers => "totalSkillTriggers",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.key() == key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectiveReward {
    pub gold: u64,
    /// Each box is one shop-generated item at the current difficulty.
    pub boxes: u32,
}

/// Static objective definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectiveDef {
    pub id: &'static str,
    pub name: &'static str,
    pub metric: Metric,
    pub target: u64,
    pub reward: ObjectiveReward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectiveStatus {
    InProgress,
    Claimable,
    Claimed,
}

/// Per-objective progress. Status is derived; only `claimed` is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectiveEntry {
    pub id: String,
    pub target: u64,
    pub progress: u64,
    pub claimed: bool,
}

impl ObjectiveEntry {
    pub fn from_def(def: &ObjectiveDef) -> Self {
        Self {
            id: def.id.to_string(),
            target: def.target,
            progress: 0,
            claimed: false,
        }
    }

    pub fn status(&self) -> ObjectiveStatus {
        if self.claimed {
            ObjectiveStatus::Claimed
        } else if self.progress >= self.target {
            ObjectiveStatus::Claimable
        } else {
            ObjectiveStatus::InProgress
        }
    }
}

/// Metric counters plus the entries they feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectiveBook {
    pub metrics: BTreeMap<Metric, u64>,
    pub entries: Vec<ObjectiveEntry>,
}

impl ObjectiveBook {
    pub fn from_defs(defs: &[ObjectiveDef]) -> Self {
        Self {
            metrics: BTreeMap::new(),
            entries: defs.iter().map(ObjectiveEntry::from_def).collect(),
        }
    }

    pub fn metric(&self, metric: Metric) -> u64 {
        self.metrics.get(&metric).copied().unwrap_or(0)
    }

    pub fn entry(&self, id: &str) -> Option<&ObjectiveEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn claimable_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.status() == ObjectiveStatus::Claimable)
            .count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestState {
    /// Local `YYYY-MM-DD` of the last daily reset.
    pub last_reset_key: String,
    #[serde(flatten)]
    pub book: ObjectiveBook,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectiveState {
    pub quests: QuestState,
    pub achievements: ObjectiveBook,
}

impl ObjectiveState {
    pub fn new(date_key: String) -> Self {
        Self {
            quests: QuestState {
                last_reset_key: date_key,
                book: ObjectiveBook::from_defs(QUEST_DEFS),
            },
            achievements: ObjectiveBook::from_defs(ACHIEVEMENT_DEFS),
        }
    }

    pub fn claimable_count(&self) -> usize {
        self.quests.book.claimable_count() + self.achievements.claimable_count()
    }
}

/// Totals granted by one claim call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClaimSummary {
    pub gold: u64,
    pub boxes: u32,
    pub claimed: usize,
}
