//! Load-time control flow: restore, daily reset, offline catch-up.

use rand::Rng;

use super::actions::refresh_daily_objectives;
use super::game_state::GameState;
use super::offline::{apply_offline_reward, estimate_offline_reward, OfflineConfig, OfflineReward};
use crate::content::Catalog;
use crate::save::{restore_from_envelope, RestoreMeta};

/// Result of resuming a session from stored save text.
#[derive(Debug, Clone)]
pub struct Resumed {
    pub state: GameState,
    pub meta: RestoreMeta,
    pub offline: OfflineReward,
}

/// Seconds between the stored save time and `now_ms`. Zero for fallbacks,
/// missing timestamps and clocks that went backwards.
fn seconds_away(meta: &RestoreMeta, now_ms: i64) -> f64 {
    if meta.is_fallback {
        return 0.0;
    }
    match meta.saved_at_ms {
        Some(saved_at) if now_ms > saved_at => (now_ms - saved_at) as f64 / 1000.0,
        _ => 0.0,
    }
}

/// Restores a snapshot from `raw` and catches it up to `now_ms`.
pub fn resume<R: Rng>(
    raw: Option<&str>,
    now_ms: i64,
    catalog: &Catalog,
    config: &OfflineConfig,
    rng: &mut R,
) -> Resumed {
    let (restored, meta) = restore_from_envelope(raw, catalog);
    let refreshed = refresh_daily_objectives(&restored, now_ms);

    let away = seconds_away(&meta, now_ms);
    let offline = estimate_offline_reward(&refreshed, away, config, catalog);
    let mut state = if offline.is_empty() {
        refreshed
    } else {
        apply_offline_reward(&refreshed, &offline, catalog)
    };
    state.ensure_shop_offer(rng);

    Resumed {
        state,
        meta,
        offline,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::CombatEventKind;
    use crate::save::build_save_envelope;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_resume_without_save_is_fresh() {
        let catalog = Catalog::builtin();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let resumed = resume(None, 10_000_000, &catalog, &OfflineConfig::default(), &mut rng);

        assert!(resumed.meta.is_fallback);
        assert!(resumed.offline.is_empty());
        assert_eq!(resumed.state.progression.kill_count, 0);
        assert!(resumed.state.inventory.shop_offer.is_some());
    }

    #[test]
    fn test_resume_applies_offline_time() {
        let catalog = Catalog::builtin();
        let state = GameState::new(&catalog, 0);
        let raw = build_save_envelope(&state, 1_000_000).to_json().unwrap();

        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let resumed = resume(
            Some(&raw),
            1_000_000 + 100_000,
            &catalog,
            &OfflineConfig::default(),
            &mut rng,
        );

        assert!(!resumed.meta.is_fallback);
        assert_eq!(resumed.offline.offline_seconds_applied, 100);
        assert_eq!(resumed.offline.kills_gained, 45);
        assert_eq!(resumed.state.progression.kill_count, 45);
        assert_eq!(resumed.state.gold, resumed.offline.gold_gained);
        assert_eq!(
            resumed.state.combat_log.count(CombatEventKind::OfflineReward),
            1
        );
    }

    #[test]
    fn test_resume_ignores_clock_going_backwards() {
        let catalog = Catalog::builtin();
        let state = GameState::new(&catalog, 0);
        let raw = build_save_envelope(&state, 5_000_000).to_json().unwrap();

        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let resumed = resume(Some(&raw), 1_000, &catalog, &OfflineConfig::default(), &mut rng);
        assert!(resumed.offline.is_empty());
        assert_eq!(resumed.state.progression.kill_count, 0);
    }
}
