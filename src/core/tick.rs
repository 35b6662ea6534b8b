//! The combat tick engine.
//!
//! `advance()` accumulates real elapsed time and resolves combat in fixed
//! logical ticks, so the outcome depends only on the total time fed in and
//! the RNG stream, never on how the time was split across frames.
//!
//! Per tick, in order:
//! 1. both attack cooldowns drop by one tick;
//! 2. a ready player attacks (on-attack skills may fire);
//! 3. a dead monster is resolved as a kill and the tick ends;
//! 4. a ready monster attacks (on-hit skills may fire);
//! 5. a dead player is healed to full and the battle restarts.

use rand::Rng;

use super::constants::{KILL_HEAL_AMOUNT, MAX_TICKS_PER_ADVANCE, TICK_INTERVAL_MS};
use super::game_state::GameState;
use super::progression::difficulty_for_kills;
use crate::combat::{
    resolve_on_attack, resolve_on_hit, spawn_monster, CombatEventKind, Combatant, EventPayload,
    SkillProc,
};
use crate::content::Catalog;
use crate::items::{generate_shop_item, roll_drop_table};

/// Advances `state` by `elapsed_ms` of real time and returns the new snapshot.
///
/// Non-positive or non-finite input returns an unchanged copy.
pub fn advance<R: Rng>(
    state: &GameState,
    elapsed_ms: f64,
    catalog: &Catalog,
    rng: &mut R,
) -> GameState {
    let mut next = state.clone();
    if !elapsed_ms.is_finite() || elapsed_ms <= 0.0 {
        return next;
    }

    let tick_ms = TICK_INTERVAL_MS as f64;
    next.clock.pending_ms += elapsed_ms;

    let mut ticks = 0u64;
    while next.clock.pending_ms >= tick_ms {
        if ticks >= MAX_TICKS_PER_ADVANCE {
            log::warn!(
                "Tick safety bound hit after {} ticks, dropping {:.0}ms of pending time",
                ticks,
                next.clock.pending_ms
            );
            next.clock.pending_ms = 0.0;
            break;
        }
        next.clock.pending_ms -= tick_ms;
        run_tick(&mut next, catalog, rng);
        ticks += 1;
    }

    next
}

fn run_tick<R: Rng>(state: &mut GameState, catalog: &Catalog, rng: &mut R) {
    let step = TICK_INTERVAL_MS as u32;
    state.clock.tick += 1;
    state.clock.elapsed_ms += TICK_INTERVAL_MS;
    let now = state.clock.elapsed_ms;

    state.player.tick_cooldown(step);
    state.monster.tick_cooldown(step);

    if state.player.cooldown_left_ms == 0 {
        player_attack(state, now, rng);
    }

    if !state.monster.is_alive() {
        resolve_kill(state, catalog, now, rng);
        return;
    }

    if state.monster.cooldown_left_ms == 0 {
        monster_attack(state, now, rng);
    }

    if !state.player.is_alive() {
        recover_player(state, now);
    }
}

/// Damage after skills: floored and clamped to `[0, u32::MAX]`.
fn finalize_damage(raw: f64) -> u32 {
    if !raw.is_finite() || raw <= 0.0 {
        return 0;
    }
    raw.floor().min(u32::MAX as f64) as u32
}

fn record_skill_procs(state: &mut GameState, procs: Vec<SkillProc>, now: u64) {
    if procs.is_empty() {
        return;
    }
    state.objectives.on_skill_triggered(procs.len() as u64);
    for proc in procs {
        state.combat_log.push(
            now,
            CombatEventKind::SkillTriggered,
            format!("{} triggered", proc.name),
            Some(EventPayload::Skill {
                skill_id: proc.skill_id,
            }),
        );
    }
}

fn player_attack<R: Rng>(state: &mut GameState, now: u64, rng: &mut R) {
    if state.player.buff.is_some_and(|b| !b.is_active(now)) {
        state.player.buff = None;
    }

    let base = state.player.atk as f64 * state.player.buff_multiplier(now);
    let (raw, procs) = resolve_on_attack(&mut state.player, base, now, rng);
    let damage = finalize_damage(raw);

    state.monster.take_damage(damage);
    state.player.reset_cooldown();

    record_skill_procs(state, procs, now);
    state.combat_log.push(
        now,
        CombatEventKind::Damage,
        format!("You hit {} for {} damage", state.monster.name, damage),
        Some(EventPayload::Damage {
            source: Combatant::Player,
            amount: damage,
            target_hp: state.monster.hp,
        }),
    );
}

fn monster_attack<R: Rng>(state: &mut GameState, now: u64, rng: &mut R) {
    let base = state.monster.atk as f64;
    let (raw, procs) = resolve_on_hit(&mut state.player, base, now, rng);
    let damage = finalize_damage(raw);

    state.player.take_damage(damage);
    state.monster.reset_cooldown();

    record_skill_procs(state, procs, now);
    state.combat_log.push(
        now,
        CombatEventKind::Damage,
        format!("{} hits you for {} damage", state.monster.name, damage),
        Some(EventPayload::Damage {
            source: Combatant::Monster,
            amount: damage,
            target_hp: state.player.hp,
        }),
    );
}

fn resolve_kill<R: Rng>(state: &mut GameState, catalog: &Catalog, now: u64, rng: &mut R) {
    let defeated = state.monster.clone();

    let progression = &mut state.progression;
    progression.kill_count = progression.kill_count.saturating_add(1);
    progression.difficulty_level = progression
        .difficulty_level
        .max(difficulty_for_kills(progression.kill_count));
    let level = progression.difficulty_level;
    let kill_count = progression.kill_count;
    let newly_unlocked = progression.zones.sync_with_difficulty(catalog, level);

    let drops = catalog
        .monster(&defeated.id)
        .map(|template| roll_drop_table(&template.drop_table, rng))
        .unwrap_or_default();

    state.gold = state.gold.saturating_add(defeated.gold_reward);
    state.player.heal(KILL_HEAL_AMOUNT);
    state.inventory.shop_offer = Some(generate_shop_item(level, rng));
    state.objectives.on_battle_won();

    log::debug!(
        "Defeated {} (kill #{}), +{} gold, difficulty {}",
        defeated.id,
        kill_count,
        defeated.gold_reward,
        level
    );

    state.combat_log.push(
        now,
        CombatEventKind::MonsterDefeated,
        format!("{} was defeated", defeated.name),
        Some(EventPayload::Defeat {
            monster_id: defeated.id.clone(),
            kill_count,
        }),
    );
    state.combat_log.push(
        now,
        CombatEventKind::GoldGained,
        format!("+{} gold", defeated.gold_reward),
        Some(EventPayload::Gold {
            amount: defeated.gold_reward,
            total: state.gold,
        }),
    );

    state.monster = spawn_monster(
        catalog,
        &state.progression.zones.current_zone_id,
        level,
        kill_count,
    );
    state.combat_log.push(
        now,
        CombatEventKind::StageClear,
        format!("Stage {} cleared, {} approaches", level, state.monster.name),
        Some(EventPayload::Stage {
            difficulty_level: level,
            monster_id: state.monster.id.clone(),
        }),
    );

    if !drops.is_empty() {
        let summary = drops
            .iter()
            .map(|d| format!("{} x{}", catalog.item_name(&d.item_id), d.quantity))
            .collect::<Vec<_>>()
            .join(", ");
        state.combat_log.push(
            now,
            CombatEventKind::LootGained,
            format!("Loot: {}", summary),
            Some(EventPayload::Loot {
                drops: drops.clone(),
            }),
        );
    }
    state.inventory.add_drops(drops);

    for zone_id in newly_unlocked {
        let name = catalog
            .zone(&zone_id)
            .map(|z| z.name.clone())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| zone_id.clone());
        log::info!("Zone unlocked: {}", zone_id);
        state.combat_log.push(
            now,
            CombatEventKind::ZoneUnlocked,
            format!("New zone unlocked: {}", name),
            Some(EventPayload::Zone { zone_id }),
        );
    }
}

fn recover_player(state: &mut GameState, now: u64) {
    state.player.heal_full();
    state.player.reset_cooldown();
    log::debug!("Player fell to {}, restarting battle", state.monster.id);
    state.combat_log.push(
        now,
        CombatEventKind::AutoBattleStop,
        format!("You were defeated by {}", state.monster.name),
        None,
    );
    state.combat_log.push(
        now,
        CombatEventKind::AutoBattleStart,
        "Recovered, auto battle restarted",
        None,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{ActiveBuff, Skill};
    use crate::content::{DropEntry, ItemDef, MonsterTemplate, ZoneDef};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn setup() -> (Catalog, GameState, ChaCha8Rng) {
        let catalog = Catalog::builtin();
        let state = GameState::new(&catalog, 0);
        (catalog, state, ChaCha8Rng::seed_from_u64(42))
    }

    fn without_skills(mut state: GameState) -> GameState {
        state.player.skills = Vec::<Skill>::new();
        state
    }

    /// One fragile monster that always drops ore, and a second zone that
    /// opens at difficulty 2.
    fn two_zone_catalog() -> Catalog {
        let zone = |id: &str, unlock: u32| ZoneDef {
            id: id.to_string(),
            name: id.to_uppercase(),
            unlock_difficulty: unlock,
            monster_pool: vec!["wisp".to_string()],
        };
        let wisp = MonsterTemplate {
            id: "wisp".to_string(),
            name: "Wisp".to_string(),
            base_hp: 1,
            base_atk: 1,
            base_gold: 2,
            attack_cooldown_ms: None,
            drop_table: vec![DropEntry::new("ore", 1.0, 1, 1)],
        };
        let ore = ItemDef {
            id: "ore".to_string(),
            name: "Ore".to_string(),
            description: String::new(),
        };
        Catalog::build(vec![zone("a", 1), zone("b", 2)], vec![wisp], vec![ore])
    }

    #[test]
    fn test_non_positive_elapsed_is_noop() {
        let (catalog, state, mut rng) = setup();
        assert_eq!(advance(&state, 0.0, &catalog, &mut rng), state);
        assert_eq!(advance(&state, -50.0, &catalog, &mut rng), state);
        assert_eq!(advance(&state, f64::NAN, &catalog, &mut rng), state);
    }

    #[test]
    fn test_sub_tick_time_accumulates() {
        let (catalog, state, mut rng) = setup();
        let next = advance(&state, 60.0, &catalog, &mut rng);
        assert_eq!(next.clock.tick, 0);
        assert_eq!(next.clock.pending_ms, 60.0);
        let next = advance(&next, 60.0, &catalog, &mut rng);
        assert_eq!(next.clock.tick, 1);
        assert!((next.clock.pending_ms - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_first_attack_after_cooldown() {
        let (catalog, state, mut rng) = setup();
        let state = without_skills(state);
        let next = advance(&state, 600.0, &catalog, &mut rng);
        assert_eq!(next.monster.hp, 40);
        let next = advance(&next, 100.0, &catalog, &mut rng);
        assert_eq!(next.monster.hp, 40 - 17);
        assert_eq!(next.player.cooldown_left_ms, next.player.cooldown_ms);
        let last = next.combat_log.last().unwrap();
        assert_eq!(last.kind, CombatEventKind::Damage);
        assert_eq!(last.timestamp_ms, 700);
    }

    #[test]
    fn test_kill_resolution_order_and_rewards() {
        let (catalog, state, mut rng) = setup();
        let mut state = without_skills(state);
        state.monster.hp = 1;
        state.player.cooldown_left_ms = 100;
        state.player.hp = 100;

        let next = advance(&state, 100.0, &catalog, &mut rng);
        assert_eq!(next.progression.kill_count, 1);
        assert_eq!(next.gold, 6);
        assert_eq!(next.player.hp, 108);
        assert!(next.inventory.shop_offer.is_some());
        assert_eq!(next.monster.id, "goblin");

        let kinds: Vec<CombatEventKind> = next.combat_log.kinds();
        let defeated = kinds
            .iter()
            .position(|k| *k == CombatEventKind::MonsterDefeated)
            .unwrap();
        assert_eq!(kinds[defeated + 1], CombatEventKind::GoldGained);
        assert_eq!(kinds[defeated + 2], CombatEventKind::StageClear);
    }

    #[test]
    fn test_kill_merges_loot_and_unlocks_zone() {
        let catalog = two_zone_catalog();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut state = without_skills(GameState::new(&catalog, 0));
        state.progression.kill_count = 2;
        state.player.cooldown_left_ms = 100;
        assert_eq!(state.progression.zones.unlocked_zone_ids, vec!["a".to_string()]);

        let next = advance(&state, 100.0, &catalog, &mut rng);
        assert_eq!(next.progression.kill_count, 3);
        assert_eq!(next.progression.difficulty_level, 2);
        assert_eq!(next.inventory.materials.get("ore"), Some(&1));
        assert!(next
            .progression
            .zones
            .unlocked_zone_ids
            .contains(&"b".to_string()));

        let kinds = next.combat_log.kinds();
        let defeated = kinds
            .iter()
            .position(|k| *k == CombatEventKind::MonsterDefeated)
            .unwrap();
        assert_eq!(
            &kinds[defeated..],
            &[
                CombatEventKind::MonsterDefeated,
                CombatEventKind::GoldGained,
                CombatEventKind::StageClear,
                CombatEventKind::LootGained,
                CombatEventKind::ZoneUnlocked,
            ]
        );
        let loot = next
            .combat_log
            .iter()
            .find(|e| e.kind == CombatEventKind::LootGained)
            .unwrap();
        assert_eq!(loot.message, "Loot: Ore x1");
    }

    #[test]
    fn test_loot_accumulates_across_kills() {
        let catalog = two_zone_catalog();
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let mut state = without_skills(GameState::new(&catalog, 0));
        state.inventory.materials.insert("ore".to_string(), 4);
        state.player.cooldown_left_ms = 100;

        let next = advance(&state, 100.0, &catalog, &mut rng);
        assert_eq!(next.inventory.materials.get("ore"), Some(&5));
        assert_eq!(next.combat_log.count(CombatEventKind::ZoneUnlocked), 0);
    }

    #[test]
    fn test_active_buff_multiplies_next_attack() {
        let (catalog, state, mut rng) = setup();
        let mut state = without_skills(state);
        state.monster.hp = 1_000;
        state.player.cooldown_left_ms = 100;
        state.player.buff = Some(ActiveBuff {
            multiplier: 2.0,
            expires_at_ms: 10_000,
        });

        let next = advance(&state, 100.0, &catalog, &mut rng);
        let expected = state.player.atk * 2;
        assert_eq!(next.monster.hp, 1_000 - expected);
        let hit = next.combat_log.last().unwrap();
        assert_eq!(
            hit.payload,
            Some(EventPayload::Damage {
                source: Combatant::Player,
                amount: expected,
                target_hp: 1_000 - expected,
            })
        );
    }

    #[test]
    fn test_expired_buff_is_cleared() {
        let (catalog, state, mut rng) = setup();
        let mut state = without_skills(state);
        state.monster.hp = 1_000;
        state.player.cooldown_left_ms = 100;
        state.player.buff = Some(ActiveBuff {
            multiplier: 2.0,
            expires_at_ms: 100,
        });

        let next = advance(&state, 100.0, &catalog, &mut rng);
        assert_eq!(next.monster.hp, 1_000 - state.player.atk);
        assert_eq!(next.player.buff, None);
    }

    #[test]
    fn test_kill_skips_monster_attack() {
        let (catalog, state, mut rng) = setup();
        let mut state = without_skills(state);
        state.monster.hp = 1;
        state.player.cooldown_left_ms = 100;
        state.monster.cooldown_left_ms = 100;
        let next = advance(&state, 100.0, &catalog, &mut rng);
        assert_eq!(next.player.hp, next.player.max_hp);
        assert_eq!(
            next.combat_log
                .iter()
                .filter(|e| matches!(
                    e.payload,
                    Some(EventPayload::Damage {
                        source: Combatant::Monster,
                        ..
                    })
                ))
                .count(),
            0
        );
    }

    #[test]
    fn test_player_death_restarts_battle() {
        let (catalog, state, mut rng) = setup();
        let mut state = without_skills(state);
        state.player.hp = 1;
        state.player.cooldown_left_ms = 500;
        state.monster.cooldown_left_ms = 100;
        let monster_hp = state.monster.hp;

        let next = advance(&state, 100.0, &catalog, &mut rng);
        assert_eq!(next.player.hp, next.player.max_hp);
        assert_eq!(next.player.cooldown_left_ms, next.player.cooldown_ms);
        assert_eq!(next.monster.hp, monster_hp);
        let kinds = next.combat_log.kinds();
        let n = kinds.len();
        assert_eq!(
            &kinds[n - 2..],
            &[CombatEventKind::AutoBattleStop, CombatEventKind::AutoBattleStart]
        );
    }

    #[test]
    fn test_input_snapshot_untouched() {
        let (catalog, state, mut rng) = setup();
        let before = state.clone();
        let _ = advance(&state, 5_000.0, &catalog, &mut rng);
        assert_eq!(state, before);
    }

    #[test]
    fn test_safety_bound_drops_excess_time() {
        let (catalog, state, mut rng) = setup();
        let huge = (MAX_TICKS_PER_ADVANCE * TICK_INTERVAL_MS * 3) as f64;
        let next = advance(&state, huge, &catalog, &mut rng);
        assert_eq!(next.clock.tick, MAX_TICKS_PER_ADVANCE);
        assert_eq!(next.clock.pending_ms, 0.0);
    }
}
