//! The versioned save document.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::core::constants::SAVE_VERSION;
use crate::core::game_state::{GameState, UpgradeLevels};
use crate::items::{Equipment, Item, StatBonus};
use crate::objectives::ObjectiveState;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveEnvelope {
    pub version: u32,
    /// Epoch milliseconds.
    pub saved_at: i64,
    pub gold: u64,
    pub player_stats: PlayerStatsSave,
    pub progress: ProgressSave,
    pub equipment: EquipmentSave,
    pub inventory: InventorySave,
    pub objectives: ObjectiveState,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStatsSave {
    pub hp: u32,
    pub max_hp: u32,
    pub atk: u32,
    pub cooldown_ms: u32,
    pub cooldown_left_ms: u32,
    pub base_stats: StatBonus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSave {
    pub kill_count: u64,
    pub difficulty_level: u32,
    pub current_zone_id: String,
    pub unlocked_zone_ids: Vec<String>,
    pub combat: CombatClockSave,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatClockSave {
    pub elapsed_ms: u64,
    pub tick: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentSave {
    pub upgrades: UpgradeLevels,
    pub slots: Equipment,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySave {
    pub materials: BTreeMap<String, u64>,
    pub equipment: Vec<Item>,
    pub shop_offer: Option<Item>,
}

impl SaveEnvelope {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Projects a snapshot into a save envelope stamped with `now_ms`.
pub fn build_save_envelope(state: &GameState, now_ms: i64) -> SaveEnvelope {
    let player = &state.player;
    let progression = &state.progression;

    SaveEnvelope {
        version: SAVE_VERSION,
        saved_at: now_ms,
        gold: state.gold,
        player_stats: PlayerStatsSave {
            hp: player.hp,
            max_hp: player.max_hp,
            atk: player.atk,
            cooldown_ms: player.cooldown_ms,
            cooldown_left_ms: player.cooldown_left_ms,
            base_stats: player.base_stats,
        },
        progress: ProgressSave {
            kill_count: progression.kill_count,
            difficulty_level: progression.difficulty_level,
            current_zone_id: progression.zones.current_zone_id.clone(),
            unlocked_zone_ids: progression.zones.unlocked_zone_ids.clone(),
            combat: CombatClockSave {
                elapsed_ms: state.clock.elapsed_ms,
                tick: state.clock.tick,
            },
        },
        equipment: EquipmentSave {
            upgrades: progression.upgrades,
            slots: player.equipment.clone(),
        },
        inventory: InventorySave {
            materials: state.inventory.materials.clone(),
            equipment: state.inventory.equipment.clone(),
            shop_offer: state.inventory.shop_offer.clone(),
        },
        objectives: state.objectives.clone(),
    }
}
