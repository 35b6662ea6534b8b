//! Offline progression system.
//!
//! Estimates kills and gold for time spent away without running the tick
//! engine, then folds the result into the state the same way live kills
//! would (minus the per-kill log events).

use serde::{Deserialize, Serialize};

use super::constants::*;
use super::game_state::GameState;
use super::progression::{difficulty_for_kills, dps};
use crate::combat::{spawn_monster, CombatEventKind, EventPayload};
use crate::content::Catalog;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfflineStrategy {
    /// Kill rate from DPS against the current monster, times elapsed time.
    #[default]
    ClosedForm,
    /// Walks kill by kill, advancing difficulty like the live engine.
    Replay,
}

/// Kill-rate multiplier for difficulty levels up to `max_difficulty`.
/// `None` matches every level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyBracket {
    pub max_difficulty: Option<u32>,
    pub kill_rate_multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OfflineConfig {
    pub cap_seconds: u64,
    pub minimum_seconds: u64,
    pub efficiency: f64,
    pub gold_efficiency: f64,
    pub min_kill_rate: f64,
    pub brackets: Vec<DifficultyBracket>,
    pub strategy: OfflineStrategy,
}

impl Default for OfflineConfig {
    fn default() -> Self {
        Self {
            cap_seconds: OFFLINE_CAP_SECONDS,
            minimum_seconds: OFFLINE_MIN_SECONDS,
            efficiency: OFFLINE_EFFICIENCY,
            gold_efficiency: OFFLINE_GOLD_EFFICIENCY,
            min_kill_rate: OFFLINE_MIN_KILL_RATE,
            brackets: vec![
                DifficultyBracket {
                    max_difficulty: Some(10),
                    kill_rate_multiplier: 1.0,
                },
                DifficultyBracket {
                    max_difficulty: Some(25),
                    kill_rate_multiplier: 0.9,
                },
                DifficultyBracket {
                    max_difficulty: None,
                    kill_rate_multiplier: 0.8,
                },
            ],
            strategy: OfflineStrategy::ClosedForm,
        }
    }
}

impl OfflineConfig {
    pub fn with_strategy(strategy: OfflineStrategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    /// Multiplier for the first bracket covering `difficulty_level`.
    pub fn kill_rate_multiplier(&self, difficulty_level: u32) -> f64 {
        self.brackets
            .iter()
            .find(|b| b.max_difficulty.map_or(true, |max| difficulty_level <= max))
            .map(|b| b.kill_rate_multiplier)
            .filter(|m| m.is_finite())
            .unwrap_or(1.0)
            .max(0.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfflineReward {
    pub kills_gained: u64,
    pub gold_gained: u64,
    pub offline_seconds_applied: u64,
}

impl OfflineReward {
    pub fn is_empty(&self) -> bool {
        self.kills_gained == 0 && self.gold_gained == 0
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Estimates the reward for `offline_seconds` away.
///
/// Applied time is capped at `config.cap_seconds`; anything under
/// `config.minimum_seconds` yields nothing.
pub fn estimate_offline_reward(
    state: &GameState,
    offline_seconds: f64,
    config: &OfflineConfig,
    catalog: &Catalog,
) -> OfflineReward {
    let seconds = if offline_seconds.is_finite() {
        offline_seconds.max(0.0)
    } else {
        0.0
    };
    let applied = seconds.min(config.cap_seconds as f64).floor() as u64;
    let efficiency = clamp_unit(config.efficiency);

    if applied == 0 || applied < config.minimum_seconds || efficiency <= 0.0 {
        return OfflineReward::default();
    }

    let (kills_gained, gold_gained) = match config.strategy {
        OfflineStrategy::ClosedForm => closed_form(state, applied, efficiency, config),
        OfflineStrategy::Replay => replay(state, applied, efficiency, config, catalog),
    };

    OfflineReward {
        kills_gained,
        gold_gained,
        offline_seconds_applied: applied,
    }
}

fn closed_form(
    state: &GameState,
    applied: u64,
    efficiency: f64,
    config: &OfflineConfig,
) -> (u64, u64) {
    let atk = state.player.atk.max(1) as f64;
    let cooldown_s = state.player.cooldown_ms.max(1) as f64 / 1000.0;
    let monster_hp = state.monster.max_hp.max(1) as f64;

    let base_rate = (atk / cooldown_s / monster_hp).max(config.min_kill_rate.max(0.0));
    let rate = base_rate
        * efficiency
        * config.kill_rate_multiplier(state.progression.difficulty_level);
    let kills = (rate * applied as f64).floor().max(0.0) as u64;

    let gold_per_kill = state.monster.gold_reward as f64 * clamp_unit(config.gold_efficiency);
    let gold = (kills as f64 * gold_per_kill).floor() as u64;
    (kills, gold)
}

fn replay(
    state: &GameState,
    applied: u64,
    efficiency: f64,
    config: &OfflineConfig,
    catalog: &Catalog,
) -> (u64, u64) {
    let player = &state.player;
    if dps(player) <= 0.0 || player.atk == 0 {
        return (0, 0);
    }

    let zone_id = state.current_zone_id();
    let gold_efficiency = clamp_unit(config.gold_efficiency);
    let attack_interval_s = player.cooldown_ms.max(1) as f64 / 1000.0;

    let mut budget = applied as f64 * efficiency;
    let mut kill_count = state.progression.kill_count;
    let mut level = state.progression.difficulty_level.max(1);
    let mut kills = 0u64;
    let mut gold = 0.0f64;

    while kills < OFFLINE_MAX_REPLAY_KILLS {
        let monster = spawn_monster(catalog, zone_id, level, kill_count);
        let hits = (monster.max_hp as f64 / player.atk as f64).ceil();
        let multiplier = config.kill_rate_multiplier(level);
        if multiplier <= 0.0 {
            break;
        }
        let time_to_kill = hits * attack_interval_s / multiplier;
        if time_to_kill > budget {
            break;
        }
        budget -= time_to_kill;

        let monster_interval_s = monster.cooldown_ms.max(1) as f64 / 1000.0;
        let incoming = monster.atk as f64 * (time_to_kill / monster_interval_s).floor();
        let penalty = if incoming > player.max_hp as f64 {
            OFFLINE_OVERKILLED_GOLD_PENALTY
        } else {
            1.0
        };
        gold += monster.gold_reward as f64 * gold_efficiency * penalty;

        kills += 1;
        kill_count = kill_count.saturating_add(1);
        level = level.max(difficulty_for_kills(kill_count));
    }

    (kills, gold.floor() as u64)
}

/// Folds an offline reward into `state`. A reward with no kills and no gold
/// returns an unchanged copy.
pub fn apply_offline_reward(
    state: &GameState,
    reward: &OfflineReward,
    catalog: &Catalog,
) -> GameState {
    let mut next = state.clone();
    if reward.is_empty() {
        return next;
    }

    next.gold = next.gold.saturating_add(reward.gold_gained);
    let progression = &mut next.progression;
    progression.kill_count = progression.kill_count.saturating_add(reward.kills_gained);
    progression.difficulty_level = progression
        .difficulty_level
        .max(difficulty_for_kills(progression.kill_count));
    let level = progression.difficulty_level;
    let kill_count = progression.kill_count;
    let newly_unlocked = progression.zones.sync_with_difficulty(catalog, level);

    next.monster = spawn_monster(
        catalog,
        &next.progression.zones.current_zone_id,
        level,
        kill_count,
    );
    next.objectives.on_offline_kills(reward.kills_gained);

    let now = next.clock.elapsed_ms;
    next.combat_log.push(
        now,
        CombatEventKind::OfflineReward,
        format!(
            "While away: {} kills, +{} gold",
            reward.kills_gained, reward.gold_gained
        ),
        Some(EventPayload::Offline {
            kills: reward.kills_gained,
            gold: reward.gold_gained,
            seconds: reward.offline_seconds_applied,
        }),
    );
    for zone_id in newly_unlocked {
        next.combat_log.push(
            now,
            CombatEventKind::ZoneUnlocked,
            format!("New zone unlocked: {}", zone_id),
            Some(EventPayload::Zone { zone_id }),
        );
    }

    log::info!(
        "Offline reward applied: {} kills, {} gold over {}s",
        reward.kills_gained,
        reward.gold_gained,
        reward.offline_seconds_applied
    );
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh() -> (Catalog, GameState) {
        let catalog = Catalog::builtin();
        let state = GameState::new(&catalog, 0);
        (catalog, state)
    }

    #[test]
    fn test_applied_seconds_capped() {
        let (catalog, state) = fresh();
        let config = OfflineConfig::default();
        for strategy in [OfflineStrategy::ClosedForm, OfflineStrategy::Replay] {
            let config = OfflineConfig {
                strategy,
                ..config.clone()
            };
            let reward = estimate_offline_reward(
                &state,
                (config.cap_seconds + 9_999) as f64,
                &config,
                &catalog,
            );
            assert_eq!(reward.offline_seconds_applied, config.cap_seconds);
        }
    }

    #[test]
    fn test_below_minimum_yields_nothing() {
        let (catalog, state) = fresh();
        let config = OfflineConfig::default();
        assert_eq!(
            estimate_offline_reward(&state, 9.0, &config, &catalog),
            OfflineReward::default()
        );
        assert_eq!(
            estimate_offline_reward(&state, f64::NAN, &config, &catalog),
            OfflineReward::default()
        );
        assert_eq!(
            estimate_offline_reward(&state, -100.0, &config, &catalog),
            OfflineReward::default()
        );
    }

    #[test]
    fn test_closed_form_matches_formula() {
        let (catalog, state) = fresh();
        let config = OfflineConfig::default();
        let reward = estimate_offline_reward(&state, 100.0, &config, &catalog);
        // 17 / 0.7 / 40 = 0.607 kills/s, * 0.75 * 1.0 * 100s = 45.5
        assert_eq!(reward.kills_gained, 45);
        // 45 * 6 * 0.9 = 243
        assert_eq!(reward.gold_gained, 243);
        assert_eq!(reward.offline_seconds_applied, 100);
    }

    #[test]
    fn test_kill_rate_floor() {
        let (catalog, mut state) = fresh();
        state.monster.max_hp = 1_000_000;
        let reward = estimate_offline_reward(&state, 1_000.0, &OfflineConfig::default(), &catalog);
        // 0.02 * 0.75 * 1000
        assert_eq!(reward.kills_gained, 15);
    }

    #[test]
    fn test_brackets() {
        let config = OfflineConfig::default();
        assert_eq!(config.kill_rate_multiplier(1), 1.0);
        assert_eq!(config.kill_rate_multiplier(10), 1.0);
        assert_eq!(config.kill_rate_multiplier(11), 0.9);
        assert_eq!(config.kill_rate_multiplier(25), 0.9);
        assert_eq!(config.kill_rate_multiplier(26), 0.8);
    }

    #[test]
    fn test_replay_advances_difficulty() {
        let (catalog, state) = fresh();
        let config = OfflineConfig::with_strategy(OfflineStrategy::Replay);
        let reward = estimate_offline_reward(&state, 600.0, &config, &catalog);
        assert!(reward.kills_gained > 0);
        assert!(reward.gold_gained > 0);
        // Scaling monsters make replay slower than the flat estimate.
        let flat = estimate_offline_reward(&state, 600.0, &OfflineConfig::default(), &catalog);
        assert!(reward.kills_gained <= flat.kills_gained);
    }

    #[test]
    fn test_apply_reward_updates_progress() {
        let (catalog, state) = fresh();
        let reward = OfflineReward {
            kills_gained: 15,
            gold_gained: 90,
            offline_seconds_applied: 60,
        };
        let next = apply_offline_reward(&state, &reward, &catalog);
        assert_eq!(next.gold, 90);
        assert_eq!(next.progression.kill_count, 15);
        assert_eq!(next.progression.difficulty_level, 6);
        assert!(next.progression.zones.is_zone_unlocked("cavern"));
        assert_eq!(next.monster.level, 6);
        assert_eq!(
            next.combat_log.kinds()[1..],
            [CombatEventKind::OfflineReward, CombatEventKind::ZoneUnlocked]
        );
        assert_eq!(
            next.objectives
                .achievements
                .metric(crate::objectives::Metric::TotalKills),
            15
        );
    }

    #[test]
    fn test_apply_empty_reward_is_noop() {
        let (catalog, state) = fresh();
        let next = apply_offline_reward(&state, &OfflineReward::default(), &catalog);
        assert_eq!(next, state);
    }

    #[test]
    fn test_config_reads_partial_json() {
        let config: OfflineConfig =
            serde_json::from_str(r#"{"capSeconds": 60, "strategy": "replay"}"#).unwrap();
        assert_eq!(config.cap_seconds, 60);
        assert_eq!(config.strategy, OfflineStrategy::Replay);
        assert_eq!(config.efficiency, OFFLINE_EFFICIENCY);
    }
}
