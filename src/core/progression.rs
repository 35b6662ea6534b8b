//! Upgrade cost curves, stat recomputation, and combat-rate estimates.

use serde::{Deserialize, Serialize};

use super::actions::ActionError;
use super::constants::{ATTACK_UPGRADE, DIFFICULTY_STEP_KILLS, HEALTH_UPGRADE, MAX_DIFFICULTY_LEVEL};
use super::game_state::{GameState, UpgradeLevels};
use crate::combat::{MonsterState, PlayerState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpgradeKind {
    Attack,
    Health,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpgradeConfig {
    pub base_cost: f64,
    pub cost_multiplier: f64,
    pub stat_multiplier: f64,
}

impl UpgradeKind {
    pub const ALL: [UpgradeKind; 2] = [UpgradeKind::Attack, UpgradeKind::Health];

    pub fn name(&self) -> &'static str {
        match self {
            UpgradeKind::Attack => "Attack",
            UpgradeKind::Health => "Health",
        }
    }

    pub fn config(&self) -> UpgradeConfig {
        let (base_cost, cost_multiplier, stat_multiplier) = match self {
            UpgradeKind::Attack => ATTACK_UPGRADE,
            UpgradeKind::Health => HEALTH_UPGRADE,
        };
        UpgradeConfig {
            base_cost,
            cost_multiplier,
            stat_multiplier,
        }
    }

    pub fn level(&self, upgrades: &UpgradeLevels) -> u32 {
        match self {
            UpgradeKind::Attack => upgrades.attack_level,
            UpgradeKind::Health => upgrades.health_level,
        }
    }
}

/// `max(1, floor(baseCost * costMultiplier^level))`, saturating at `u64::MAX`.
pub fn upgrade_cost(kind: UpgradeKind, level: u32) -> u64 {
    let config = kind.config();
    let raw = (config.base_cost * config.cost_multiplier.powf(level as f64)).floor();
    if !raw.is_finite() || raw >= u64::MAX as f64 {
        return u64::MAX;
    }
    (raw as u64).max(1)
}

pub fn can_afford(state: &GameState, kind: UpgradeKind) -> bool {
    let level = kind.level(&state.progression.upgrades);
    state.gold >= upgrade_cost(kind, level)
}

/// `1 + floor(kills / step)`, capped at `MAX_DIFFICULTY_LEVEL`.
pub fn difficulty_for_kills(kill_count: u64) -> u32 {
    let level = 1 + kill_count / DIFFICULTY_STEP_KILLS;
    level.min(MAX_DIFFICULTY_LEVEL as u64) as u32
}

fn scaled_stat(base: u32, multiplier: f64, level: u32) -> u32 {
    let value = (base as f64 * multiplier.powf(level as f64)).floor();
    if !value.is_finite() || value >= u32::MAX as f64 {
        u32::MAX
    } else {
        value.max(0.0) as u32
    }
}

/// Recomputes atk and max hp from base stats, upgrade levels and equipped
/// items. Current hp keeps its fraction of max hp.
pub fn recompute_player_stats(player: &mut PlayerState, upgrades: &UpgradeLevels) {
    let bonus = player.equipment.bonuses();
    player.equipment_bonus = bonus;

    let atk_mult = UpgradeKind::Attack.config().stat_multiplier;
    let hp_mult = UpgradeKind::Health.config().stat_multiplier;
    player.atk = scaled_stat(player.base_stats.atk, atk_mult, upgrades.attack_level)
        .saturating_add(bonus.atk);

    let old_max = player.max_hp;
    let new_max = scaled_stat(player.base_stats.hp, hp_mult, upgrades.health_level)
        .saturating_add(bonus.hp)
        .max(1);

    let hp = if old_max == 0 {
        new_max
    } else {
        let ratio = player.hp as f64 / old_max as f64;
        let rescaled = (ratio * new_max as f64).round() as u32;
        if player.hp > 0 {
            rescaled.max(1)
        } else {
            rescaled
        }
    };
    player.max_hp = new_max;
    player.hp = hp.min(new_max);
    player.cooldown_left_ms = player.cooldown_left_ms.min(player.cooldown_ms);
}

/// Buys one level of `kind`. On `Err` the caller keeps its snapshot.
pub fn apply_upgrade(state: &GameState, kind: UpgradeKind) -> Result<GameState, ActionError> {
    let level = kind.level(&state.progression.upgrades);
    let cost = upgrade_cost(kind, level);
    if state.gold < cost {
        return Err(ActionError::InsufficientGold {
            needed: cost,
            available: state.gold,
        });
    }

    let mut next = state.clone();
    next.gold -= cost;
    match kind {
        UpgradeKind::Attack => next.progression.upgrades.attack_level += 1,
        UpgradeKind::Health => next.progression.upgrades.health_level += 1,
    }
    recompute_player_stats(&mut next.player, &next.progression.upgrades);
    log::debug!("{} upgraded to level {} for {} gold", kind.name(), level + 1, cost);
    Ok(next)
}

/// Damage per second ignoring skills and buffs.
pub fn dps(player: &PlayerState) -> f64 {
    let cooldown_s = player.cooldown_ms.max(1) as f64 / 1000.0;
    player.atk as f64 / cooldown_s
}

/// Seconds the player survives against `monster`; infinite when the monster
/// deals no damage.
pub fn survival_seconds(player: &PlayerState, monster: &MonsterState) -> f64 {
    let cooldown_s = monster.cooldown_ms.max(1) as f64 / 1000.0;
    let incoming = monster.atk as f64 / cooldown_s;
    if incoming <= 0.0 {
        f64::INFINITY
    } else {
        player.hp as f64 / incoming
    }
}
