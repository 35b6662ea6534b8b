//! Drives the live engine frame by frame.
//!
//! Statistics are read back out of each new snapshot; the runner holds no
//! combat logic of its own.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::config::SimConfig;
use super::report::{RunStats, SimReport};
use crate::combat::CombatEventKind;
use crate::content::Catalog;
use crate::core::game_state::GameState;
use crate::core::offline::{estimate_offline_reward, OfflineConfig, OfflineStrategy};
use crate::core::tick::advance;
use crate::objectives::Metric;

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig, catalog: &Catalog) -> SimReport {
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs.max(1) {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
            None => StdRng::from_entropy(),
        };

        let stats = simulate_single_run(config, catalog, &mut rng);
        log::debug!(
            "Run {} - kills {}, gold {}, level {}, deaths {}",
            run_idx + 1,
            stats.kills,
            stats.gold,
            stats.difficulty_level,
            stats.deaths
        );
        all_runs.push(stats);
    }

    SimReport::from_runs(all_runs, config)
}

/// Deaths recorded by `advance()` since `since_ms`.
fn new_deaths(state: &GameState, since_ms: u64) -> u64 {
    state
        .combat_log
        .iter()
        .filter(|e| e.timestamp_ms > since_ms && e.kind == CombatEventKind::AutoBattleStop)
        .count() as u64
}

/// Plays one fresh state for `config.seconds` and estimates the same span
/// offline with both strategies.
pub fn simulate_single_run<R: Rng>(
    config: &SimConfig,
    catalog: &Catalog,
    rng: &mut R,
) -> RunStats {
    let mut state = GameState::new(catalog, 0);
    state.ensure_shop_offer(rng);
    let start = state.clone();

    let total_ms = config.seconds as f64 * 1000.0;
    let frame_ms = config.effective_frame_ms();
    let mut fed_ms = 0.0;
    let mut frames = 0u64;
    let mut deaths = 0u64;

    while fed_ms < total_ms {
        let delta = frame_ms.min(total_ms - fed_ms);
        let since = state.clock.elapsed_ms;
        state = advance(&state, delta, catalog, rng);
        deaths += new_deaths(&state, since);
        fed_ms += delta;
        frames += 1;
    }

    let estimate = |strategy: OfflineStrategy| {
        let offline = OfflineConfig {
            strategy,
            ..config.offline.clone()
        };
        estimate_offline_reward(&start, config.seconds as f64, &offline, catalog)
    };

    RunStats {
        frames,
        ticks: state.clock.tick,
        kills: state.progression.kill_count,
        gold: state.gold,
        difficulty_level: state.progression.difficulty_level,
        deaths,
        skill_triggers: state.objectives.achievements.metric(Metric::TotalSkillTriggers),
        unlocked_zones: state.progression.zones.unlocked_zone_ids.len(),
        closed_form: estimate(OfflineStrategy::ClosedForm),
        replay: estimate(OfflineStrategy::Replay),
    }
}
