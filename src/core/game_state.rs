use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::combat::{spawn_monster, CombatEventKind, CombatLog, MonsterState, PlayerState};
use crate::content::Catalog;
use crate::items::{generate_shop_item, InventoryState};
use crate::objectives::{date_key, ObjectiveState};
use crate::zones::ZoneProgression;

/// Purchased upgrade levels per stat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeLevels {
    pub attack_level: u32,
    pub health_level: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressionState {
    /// Never decreases.
    pub kill_count: u64,
    /// Always `difficulty_for_kills(kill_count)` or higher.
    pub difficulty_level: u32,
    pub upgrades: UpgradeLevels,
    pub zones: ZoneProgression,
}

/// Logical combat time. `elapsed_ms + pending_ms` equals the total real
/// time fed into `advance`, minus anything dropped by the safety bound.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CombatClock {
    pub elapsed_ms: u64,
    pub pending_ms: f64,
    pub tick: u64,
}

/// A full snapshot of the simulation.
///
/// Transitions never mutate a snapshot that has been handed out; they clone
/// and return a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub gold: u64,
    pub player: PlayerState,
    pub monster: MonsterState,
    pub progression: ProgressionState,
    pub inventory: InventoryState,
    pub clock: CombatClock,
    pub combat_log: CombatLog,
    pub objectives: ObjectiveState,
}

impl GameState {
    /// Creates a fresh level-1 state in the catalog's default zone.
    ///
    /// The shop offer starts empty; call [`GameState::ensure_shop_offer`]
    /// or let the first kill roll one.
    pub fn new(catalog: &Catalog, now_ms: i64) -> Self {
        let zones = ZoneProgression::new(catalog);
        let monster = spawn_monster(catalog, &zones.current_zone_id, 1, 0);

        let mut combat_log = CombatLog::new();
        combat_log.push(
            0,
            CombatEventKind::AutoBattleStart,
            format!("Auto battle started against {}", monster.name),
            None,
        );

        Self {
            gold: 0,
            player: PlayerState::new(),
            monster,
            progression: ProgressionState {
                kill_count: 0,
                difficulty_level: 1,
                upgrades: UpgradeLevels::default(),
                zones,
            },
            inventory: InventoryState::new(),
            clock: CombatClock::default(),
            combat_log,
            objectives: ObjectiveState::new(date_key(now_ms)),
        }
    }

    /// Rolls a shop offer at the current difficulty if none is present.
    pub fn ensure_shop_offer(&mut self, rng: &mut impl Rng) {
        if self.inventory.shop_offer.is_none() {
            self.inventory.shop_offer =
                Some(generate_shop_item(self.progression.difficulty_level, rng));
        }
    }

    pub fn current_zone_id(&self) -> &str {
        &self.progression.zones.current_zone_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_new_state_defaults() {
        let catalog = Catalog::builtin();
        let state = GameState::new(&catalog, 0);
        assert_eq!(state.gold, 0);
        assert_eq!(state.player.atk, 17);
        assert_eq!(state.player.hp, 140);
        assert_eq!(state.monster.hp, 40);
        assert_eq!(state.progression.difficulty_level, 1);
        assert_eq!(state.current_zone_id(), "meadow");
        assert_eq!(state.combat_log.len(), 1);
        assert_eq!(
            state.combat_log.last().map(|e| e.kind),
            Some(CombatEventKind::AutoBattleStart)
        );
        assert!(state.inventory.shop_offer.is_none());
    }

    #[test]
    fn test_ensure_shop_offer_only_fills_empty() {
        let catalog = Catalog::builtin();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut state = GameState::new(&catalog, 0);
        state.ensure_shop_offer(&mut rng);
        let first = state.inventory.shop_offer.clone();
        assert!(first.is_some());
        state.ensure_shop_offer(&mut rng);
        assert_eq!(state.inventory.shop_offer, first);
    }
}
