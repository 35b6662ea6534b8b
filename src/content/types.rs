//! Static content definitions: zones, monster templates, and material items.

use serde::{Deserialize, Serialize};

fn default_unlock_difficulty() -> u32 {
    1
}

fn default_drop_min() -> u32 {
    1
}

/// A zone players can fight in once the difficulty threshold is reached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneDef {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Minimum difficulty level at which this zone unlocks.
    #[serde(default = "default_unlock_difficulty", alias = "unlockStage")]
    pub unlock_difficulty: u32,
    /// Monster template ids, cycled by kill count.
    #[serde(default)]
    pub monster_pool: Vec<String>,
}

/// Base stats for a monster before difficulty scaling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonsterTemplate {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub base_hp: u32,
    pub base_atk: u32,
    #[serde(alias = "rewardGold")]
    pub base_gold: u32,
    /// Overrides the default monster attack cooldown.
    #[serde(default)]
    pub attack_cooldown_ms: Option<u32>,
    #[serde(default)]
    pub drop_table: Vec<DropEntry>,
}

/// One row of a monster's drop table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropEntry {
    pub item_id: String,
    /// Probability in [0, 1]; out-of-range values are clamped when rolled.
    pub chance: f64,
    #[serde(default = "default_drop_min")]
    pub min: u32,
    #[serde(default)]
    pub max: Option<u32>,
}

impl DropEntry {
    pub fn new(item_id: &str, chance: f64, min: u32, max: u32) -> Self {
        Self {
            item_id: item_id.to_string(),
            chance,
            min,
            max: Some(max),
        }
    }

    /// Quantity bounds after normalization: `1 <= min <= max`.
    pub fn quantity_range(&self) -> (u32, u32) {
        let min = self.min.max(1);
        let max = self.max.unwrap_or(min).max(min);
        (min, max)
    }
}

/// Display metadata for a material item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDef {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}
