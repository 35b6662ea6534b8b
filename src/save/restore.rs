//! Rebuilding a snapshot from raw save input.
//!
//! Restore never fails: absent, unparseable or wrong-version input yields a
//! fresh default state with `RestoreMeta::is_fallback` set. Accepted input
//! is clamped field by field so the result always satisfies the same
//! invariants as a freshly created state.

use serde_json::Value;
use thiserror::Error;

use super::lenient::{self, field};
use crate::combat::{spawn_monster, CombatEventKind, CombatLog};
use crate::content::Catalog;
use crate::core::constants::{
    MAX_DIFFICULTY_LEVEL, MAX_KILL_COUNT, PLAYER_ATTACK_COOLDOWN_MS, PLAYER_BASE_ATK,
    PLAYER_BASE_MAX_HP, SAVE_VERSION,
};
use crate::core::game_state::{CombatClock, GameState, UpgradeLevels};
use crate::core::progression::{difficulty_for_kills, recompute_player_stats};
use crate::items::{EquipmentSlot, Item, StatBonus};
use crate::objectives::{
    Metric, ObjectiveBook, ObjectiveDef, ObjectiveState, ACHIEVEMENT_DEFS, QUEST_DEFS,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SaveError {
    #[error("no save data")]
    Missing,
    #[error("save data is malformed: {0}")]
    Malformed(String),
    #[error("save version {found:?} does not match expected version {expected}")]
    VersionMismatch { found: Option<i64>, expected: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreMeta {
    pub is_fallback: bool,
    /// `savedAt` from the envelope; `None` on fallback or when missing.
    pub saved_at_ms: Option<i64>,
    pub reason: Option<SaveError>,
}

/// Parses raw input and checks the schema version.
pub fn parse_envelope(raw: Option<&str>) -> Result<Value, SaveError> {
    let raw = raw.map(str::trim).filter(|r| !r.is_empty()).ok_or(SaveError::Missing)?;
    let value: Value =
        serde_json::from_str(raw).map_err(|e| SaveError::Malformed(e.to_string()))?;
    if !value.is_object() {
        return Err(SaveError::Malformed("top level is not an object".to_string()));
    }

    // Strict: floats and numeric strings are not a valid version.
    let found = field(Some(&value), "version").and_then(Value::as_i64);
    if found != Some(SAVE_VERSION as i64) {
        return Err(SaveError::VersionMismatch {
            found,
            expected: SAVE_VERSION,
        });
    }
    Ok(value)
}

/// Restores a snapshot from raw save text.
pub fn restore_from_envelope(raw: Option<&str>, catalog: &Catalog) -> (GameState, RestoreMeta) {
    match parse_envelope(raw) {
        Ok(value) => {
            let saved_at_ms = lenient::int(field(Some(&value), "savedAt")).filter(|t| *t >= 0);
            let state = restore_state(&value, catalog);
            (
                state,
                RestoreMeta {
                    is_fallback: false,
                    saved_at_ms,
                    reason: None,
                },
            )
        }
        Err(reason) => {
            if reason != SaveError::Missing {
                log::warn!("Save rejected, starting fresh: {}", reason);
            }
            (
                GameState::new(catalog, 0),
                RestoreMeta {
                    is_fallback: true,
                    saved_at_ms: None,
                    reason: Some(reason),
                },
            )
        }
    }
}

fn restore_state(root: &Value, catalog: &Catalog) -> GameState {
    let root = Some(root);
    let mut state = GameState::new(catalog, 0);

    state.gold = lenient::u64_or(field(root, "gold"), 0);

    // Progress
    let progress = field(root, "progress");
    let kill_count = lenient::u64_or(field(progress, "killCount"), 0).min(MAX_KILL_COUNT);
    let stored_level = lenient::u32_or(field(progress, "difficultyLevel"), 1);
    let difficulty_level = stored_level
        .max(difficulty_for_kills(kill_count))
        .clamp(1, MAX_DIFFICULTY_LEVEL);
    state.progression.kill_count = kill_count;
    state.progression.difficulty_level = difficulty_level;

    let zones = &mut state.progression.zones;
    let stored_unlocked = lenient::string_list(field(progress, "unlockedZoneIds"));
    zones.merge_stored(catalog, &stored_unlocked, difficulty_level);
    let current_zone_id = lenient::string(field(progress, "currentZoneId"))
        .filter(|id| catalog.zone(id).is_some() && zones.is_zone_unlocked(id))
        .map(str::to_string)
        .unwrap_or_else(|| catalog.default_zone().id.clone());
    zones.current_zone_id = current_zone_id;

    let clock = field(progress, "combat");
    state.clock = CombatClock {
        elapsed_ms: lenient::u64_or(field(clock, "elapsedMs"), 0),
        pending_ms: 0.0,
        tick: lenient::u64_or(field(clock, "tick"), 0),
    };

    // Upgrades: current layout first, older `progress.upgrades` as a fallback.
    let upgrades = field(field(root, "equipment"), "upgrades")
        .or_else(|| field(progress, "upgrades"));
    state.progression.upgrades = UpgradeLevels {
        attack_level: lenient::u32_or(field(upgrades, "attackLevel"), 0),
        health_level: lenient::u32_or(field(upgrades, "healthLevel"), 0),
    };

    // Inventory and equipped items
    let inventory = field(root, "inventory");
    let mut next_id = 0u32;
    let mut fallback_id = || {
        next_id += 1;
        format!("restored-{}", next_id)
    };

    let mut owned: Vec<Item> = field(inventory, "equipment")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|v| lenient::item(v, &mut fallback_id))
                .collect()
        })
        .unwrap_or_default();

    let slots = field(field(root, "equipment"), "slots");
    for slot in EquipmentSlot::ALL {
        let key = slot.name().to_ascii_lowercase();
        let Some(item) = field(slots, &key).and_then(|v| lenient::item(v, &mut fallback_id))
        else {
            continue;
        };
        if item.slot == slot {
            state.player.equipment.set(slot, Some(item));
        } else {
            owned.push(item);
        }
    }
    state.inventory.equipment = owned;
    state.inventory.shop_offer =
        field(inventory, "shopOffer").and_then(|v| lenient::item(v, &mut fallback_id));

    if let Some(materials) = lenient::object(field(inventory, "materials")) {
        for (id, qty) in materials {
            let qty = lenient::u64_or(Some(qty), 0);
            if !id.is_empty() && qty > 0 {
                state.inventory.materials.insert(id.clone(), qty);
            }
        }
    }

    // Player stats
    let stats = field(root, "playerStats");
    let base = field(stats, "baseStats");
    let base_hp = field(base, "hp").or_else(|| field(base, "maxHp"));
    state.player.base_stats = StatBonus {
        atk: lenient::u32_or(field(base, "atk"), PLAYER_BASE_ATK).max(1),
        hp: lenient::u32_or(base_hp, PLAYER_BASE_MAX_HP).max(1),
    };
    let cooldown_ms = lenient::u32_or(field(stats, "cooldownMs"), PLAYER_ATTACK_COOLDOWN_MS).max(1);
    state.player.cooldown_ms = cooldown_ms;
    state.player.cooldown_left_ms =
        lenient::u32_or(field(stats, "cooldownLeftMs"), cooldown_ms).min(cooldown_ms);

    // Seed max/hp with the stored pair so recomputation keeps the stored
    // hp fraction against the freshly derived max.
    let stored_max = lenient::u32_or(field(stats, "maxHp"), 0);
    if stored_max > 0 {
        state.player.max_hp = stored_max;
        state.player.hp = lenient::u32_or(field(stats, "hp"), stored_max).min(stored_max);
    }
    recompute_player_stats(&mut state.player, &state.progression.upgrades);

    state.objectives = restore_objectives(field(root, "objectives"));

    state.monster = spawn_monster(
        catalog,
        &state.progression.zones.current_zone_id,
        difficulty_level,
        kill_count,
    );
    state.combat_log = CombatLog::new();
    state.combat_log.push(
        state.clock.elapsed_ms,
        CombatEventKind::AutoBattleStart,
        format!("Auto battle resumed against {}", state.monster.name),
        None,
    );

    state
}

fn restore_book(value: Option<&Value>, defs: &[ObjectiveDef]) -> ObjectiveBook {
    let mut book = ObjectiveBook::from_defs(defs);

    if let Some(metrics) = lenient::object(field(value, "metrics")) {
        for (key, count) in metrics {
            if let Some(metric) = Metric::from_key(key) {
                book.metrics.insert(metric, lenient::u64_or(Some(count), 0));
            }
        }
    }

    let stored: Vec<&Value> = field(value, "entries")
        .and_then(Value::as_array)
        .map(|entries| entries.iter().collect())
        .unwrap_or_default();
    for entry in &mut book.entries {
        entry.claimed = stored
            .iter()
            .find(|v| lenient::string(field(Some(**v), "id")) == Some(entry.id.as_str()))
            .map(|v| lenient::boolean(field(Some(*v), "claimed")))
            .unwrap_or(false);
    }

    book.sync_progress();
    book
}

fn restore_objectives(value: Option<&Value>) -> ObjectiveState {
    let quests = field(value, "quests");
    let mut state = ObjectiveState::new(
        lenient::string(field(quests, "lastResetKey"))
            .unwrap_or_default()
            .to_string(),
    );
    state.quests.book = restore_book(quests, QUEST_DEFS);
    state.achievements = restore_book(field(value, "achievements"), ACHIEVEMENT_DEFS);
    state
}
