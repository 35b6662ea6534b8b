use serde::{Deserialize, Serialize};

use super::skills::{default_skills, Skill};
use crate::core::constants::{PLAYER_ATTACK_COOLDOWN_MS, PLAYER_BASE_ATK, PLAYER_BASE_MAX_HP};
use crate::items::{Equipment, StatBonus};

/// Timed attack multiplier installed by a skill.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActiveBuff {
    pub multiplier: f64,
    /// Logical combat time (ms) at which the buff stops applying.
    pub expires_at_ms: u64,
}

impl ActiveBuff {
    pub fn is_active(&self, now_ms: u64) -> bool {
        now_ms < self.expires_at_ms
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub hp: u32,
    pub max_hp: u32,
    pub atk: u32,
    pub cooldown_ms: u32,
    pub cooldown_left_ms: u32,
    /// Pre-upgrade, pre-equipment stats.
    pub base_stats: StatBonus,
    pub equipment: Equipment,
    /// Cached `equipment.bonuses()`, refreshed on every stat recomputation.
    pub equipment_bonus: StatBonus,
    pub buff: Option<ActiveBuff>,
    pub skills: Vec<Skill>,
}

impl PlayerState {
    pub fn new() -> Self {
        Self {
            hp: PLAYER_BASE_MAX_HP,
            max_hp: PLAYER_BASE_MAX_HP,
            atk: PLAYER_BASE_ATK,
            cooldown_ms: PLAYER_ATTACK_COOLDOWN_MS,
            cooldown_left_ms: PLAYER_ATTACK_COOLDOWN_MS,
            base_stats: StatBonus {
                atk: PLAYER_BASE_ATK,
                hp: PLAYER_BASE_MAX_HP,
            },
            equipment: Equipment::new(),
            equipment_bonus: StatBonus::default(),
            buff: None,
            skills: default_skills(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
    }

    pub fn heal(&mut self, amount: u32) {
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
    }

    pub fn heal_full(&mut self) {
        self.hp = self.max_hp;
    }

    pub fn reset_cooldown(&mut self) {
        self.cooldown_left_ms = self.cooldown_ms;
    }

    pub fn tick_cooldown(&mut self, elapsed_ms: u32) {
        self.cooldown_left_ms = self.cooldown_left_ms.saturating_sub(elapsed_ms);
    }

    /// Multiplier from the timed buff, or 1.0 once it has expired.
    pub fn buff_multiplier(&self, now_ms: u64) -> f64 {
        match self.buff {
            Some(buff) if buff.is_active(now_ms) => buff.multiplier,
            _ => 1.0,
        }
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterState {
    /// Template id; also the key for the drop table in the catalog.
    pub id: String,
    pub name: String,
    pub level: u32,
    pub zone_id: String,
    pub hp: u32,
    pub max_hp: u32,
    pub atk: u32,
    pub gold_reward: u64,
    pub cooldown_ms: u32,
    pub cooldown_left_ms: u32,
}

impl MonsterState {
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
    }

    pub fn reset_cooldown(&mut self) {
        self.cooldown_left_ms = self.cooldown_ms;
    }

    pub fn tick_cooldown(&mut self, elapsed_ms: u32) {
        self.cooldown_left_ms = self.cooldown_left_ms.saturating_sub(elapsed_ms);
    }
}
