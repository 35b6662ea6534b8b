//! Monster factory: scales catalog templates to the current difficulty.

use super::types::MonsterState;
use crate::content::Catalog;
use crate::core::constants::{
    MONSTER_ATK_GROWTH, MONSTER_ATTACK_COOLDOWN_MS, MONSTER_GOLD_GROWTH, MONSTER_HP_GROWTH,
};

/// `round(base * growth^(level - 1))`. Level 1 returns the base unchanged.
pub fn scale_stat(base: u32, growth: f64, level: u32) -> u64 {
    let exponent = (level.max(1) - 1) as f64;
    let scaled = base as f64 * growth.powf(exponent);
    if scaled.is_finite() {
        scaled.round().max(0.0) as u64
    } else {
        u64::MAX
    }
}

fn clamp_u32(value: u64) -> u32 {
    value.min(u32::MAX as u64) as u32
}

/// Spawns the next monster for `zone_id` at `difficulty_level`.
///
/// The template comes from the zone's pool cycled by `kill_count`; unknown
/// zones and dangling pool entries resolve to the catalog defaults.
pub fn spawn_monster(
    catalog: &Catalog,
    zone_id: &str,
    difficulty_level: u32,
    kill_count: u64,
) -> MonsterState {
    let zone = catalog.resolve_zone(zone_id);
    let template = catalog.select_monster_for_zone(&zone.id, kill_count);
    let level = difficulty_level.max(1);

    let max_hp = clamp_u32(scale_stat(template.base_hp, MONSTER_HP_GROWTH, level).max(1));
    let atk = clamp_u32(scale_stat(template.base_atk, MONSTER_ATK_GROWTH, level));
    let gold_reward = scale_stat(template.base_gold, MONSTER_GOLD_GROWTH, level).max(1);
    let cooldown_ms = template
        .attack_cooldown_ms
        .unwrap_or(MONSTER_ATTACK_COOLDOWN_MS)
        .max(1);

    log::debug!(
        "Spawned {} (lv {}) in {}: {} hp, {} atk",
        template.id,
        level,
        zone.id,
        max_hp,
        atk
    );

    MonsterState {
        id: template.id.clone(),
        name: if template.name.is_empty() {
            template.id.clone()
        } else {
            template.name.clone()
        },
        level,
        zone_id: zone.id.clone(),
        hp: max_hp,
        max_hp,
        atk,
        gold_reward,
        cooldown_ms,
        cooldown_left_ms: cooldown_ms,
    }
}
