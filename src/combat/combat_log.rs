//! Bounded combat event log.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::core::constants::MAX_COMBAT_LOG;
use crate::items::DropResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CombatEventKind {
    AutoBattleStart,
    AutoBattleStop,
    Damage,
    SkillTriggered,
    MonsterDefeated,
    GoldGained,
    StageClear,
    LootGained,
    ZoneUnlocked,
    OfflineReward,
}

impl CombatEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CombatEventKind::AutoBattleStart => "AUTO_BATTLE_START",
            CombatEventKind::AutoBattleStop => "AUTO_BATTLE_STOP",
            CombatEventKind::Damage => "DAMAGE",
            CombatEventKind::SkillTriggered => "SKILL_TRIGGERED",
            CombatEventKind::MonsterDefeated => "MONSTER_DEFEATED",
            CombatEventKind::GoldGained => "GOLD_GAINED",
            CombatEventKind::StageClear => "STAGE_CLEAR",
            CombatEventKind::LootGained => "LOOT_GAINED",
            CombatEventKind::ZoneUnlocked => "ZONE_UNLOCKED",
            CombatEventKind::OfflineReward => "OFFLINE_REWARD",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Combatant {
    Player,
    Monster,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum EventPayload {
    Damage {
        source: Combatant,
        amount: u32,
        target_hp: u32,
    },
    Skill {
        skill_id: String,
    },
    Defeat {
        monster_id: String,
        kill_count: u64,
    },
    Gold {
        amount: u64,
        total: u64,
    },
    Stage {
        difficulty_level: u32,
        monster_id: String,
    },
    Loot {
        drops: Vec<DropResult>,
    },
    Zone {
        zone_id: String,
    },
    Offline {
        kills: u64,
        gold: u64,
        seconds: u64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatLogEvent {
    /// Logical ms since the combat state was created.
    pub timestamp_ms: u64,
    pub kind: CombatEventKind,
    pub message: String,
    pub payload: Option<EventPayload>,
}

/// Event log that keeps only the newest `capacity` entries.
#[derive(Debug, Clone, PartialEq)]
pub struct CombatLog {
    capacity: usize,
    events: VecDeque<CombatLogEvent>,
}

impl CombatLog {
    pub fn new() -> Self {
        Self::with_capacity(MAX_COMBAT_LOG)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            events: VecDeque::with_capacity(capacity),
        }
    }

    /// Appends an event, evicting from the front once over capacity.
    pub fn push(
        &mut self,
        timestamp_ms: u64,
        kind: CombatEventKind,
        message: impl Into<String>,
        payload: Option<EventPayload>,
    ) {
        self.events.push_back(CombatLogEvent {
            timestamp_ms,
            kind,
            message: message.into(),
            payload,
        });
        while self.events.len() > self.capacity {
            self.events.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &CombatLogEvent> {
        self.events.iter()
    }

    pub fn last(&self) -> Option<&CombatLogEvent> {
        self.events.back()
    }

    pub fn kinds(&self) -> Vec<CombatEventKind> {
        self.events.iter().map(|e| e.kind).collect()
    }

    pub fn count(&self, kind: CombatEventKind) -> usize {
        self.events.iter().filter(|e| e.kind == kind).count()
    }
}

impl Default for CombatLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_evicts_oldest() {
        let mut log = CombatLog::with_capacity(3);
        for t in 0..5 {
            log.push(t, CombatEventKind::Damage, format!("hit {t}"), None);
        }
        assert_eq!(log.len(), 3);
        let stamps: Vec<u64> = log.iter().map(|e| e.timestamp_ms).collect();
        assert_eq!(stamps, vec![2, 3, 4]);
        assert_eq!(log.last().map(|e| e.message.as_str()), Some("hit 4"));
    }

    #[test]
    fn test_default_capacity_is_max_log() {
        let mut log = CombatLog::new();
        for t in 0..(MAX_COMBAT_LOG as u64 * 2) {
            log.push(t, CombatEventKind::Damage, "", None);
        }
        assert_eq!(log.len(), MAX_COMBAT_LOG);
        assert_eq!(log.capacity(), MAX_COMBAT_LOG);
    }

    #[test]
    fn test_zero_capacity_clamped() {
        let mut log = CombatLog::with_capacity(0);
        log.push(0, CombatEventKind::AutoBattleStart, "start", None);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_kind_serializes_screaming_snake() {
        let json = serde_json::to_string(&CombatEventKind::MonsterDefeated).unwrap();
        assert_eq!(json, "\"MONSTER_DEFEATED\"");
        assert_eq!(CombatEventKind::StageClear.as_str(), "STAGE_CLEAR");
    }

    #[test]
    fn test_payload_fields_serialize_camel_case() {
        let damage = EventPayload::Damage {
            source: Combatant::Player,
            amount: 17,
            target_hp: 23,
        };
        let value = serde_json::to_value(&damage).unwrap();
        assert_eq!(value["type"], "damage");
        assert_eq!(value["targetHp"], 23);
        assert!(value.get("target_hp").is_none());

        let stage = EventPayload::Stage {
            difficulty_level: 4,
            monster_id: "orc".to_string(),
        };
        let value = serde_json::to_value(&stage).unwrap();
        assert_eq!(value["difficultyLevel"], 4);
        assert_eq!(value["monsterId"], "orc");

        let skill: EventPayload =
            serde_json::from_str(r#"{"type":"skill","skillId":"battle_cry"}"#).unwrap();
        assert_eq!(
            skill,
            EventPayload::Skill {
                skill_id: "battle_cry".to_string()
            }
        );
    }

    #[test]
    fn test_count_by_kind() {
        let mut log = CombatLog::new();
        log.push(0, CombatEventKind::AutoBattleStart, "start", None);
        log.push(
            100,
            CombatEventKind::GoldGained,
            "+6 gold",
            Some(EventPayload::Gold { amount: 6, total: 6 }),
        );
        assert_eq!(log.count(CombatEventKind::GoldGained), 1);
        assert_eq!(
            log.kinds(),
            vec![CombatEventKind::AutoBattleStart, CombatEventKind::GoldGained]
        );
    }
}
