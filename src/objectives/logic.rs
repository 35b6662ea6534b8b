//! Objective tracking, daily reset, and claiming.

use chrono::{DateTime, Local};

use super::data::{get_objective_def, QUEST_DEFS};
use super::types::{ClaimSummary, Metric, ObjectiveBook, ObjectiveState, ObjectiveStatus};
use crate::items::Item;

/// Local calendar date (`YYYY-MM-DD`) for an epoch-ms timestamp.
pub fn date_key(now_ms: i64) -> String {
    match DateTime::from_timestamp_millis(now_ms) {
        Some(utc) => utc.with_timezone(&Local).format("%Y-%m-%d").to_string(),
        None => "1970-01-01".to_string(),
    }
}

impl ObjectiveBook {
    fn bump(&mut self, metric: Metric, amount: u64) {
        if amount == 0 {
            return;
        }
        let counter = self.metrics.entry(metric).or_insert(0);
        *counter = counter.saturating_add(amount);
        self.sync_progress();
    }

    /// Recomputes `progress = min(target, metric)` for every entry.
    pub fn sync_progress(&mut self) {
        for entry in &mut self.entries {
            let Some(def) = get_objective_def(&entry.id) else {
                continue;
            };
            entry.target = def.target;
            let value = self.metrics.get(&def.metric).copied().unwrap_or(0);
            entry.progress = value.min(def.target);
        }
    }

    fn claim(&mut self, summary: &mut ClaimSummary) {
        for entry in &mut self.entries {
            if entry.status() != ObjectiveStatus::Claimable {
                continue;
            }
            let Some(def) = get_objective_def(&entry.id) else {
                continue;
            };
            entry.claimed = true;
            summary.gold = summary.gold.saturating_add(def.reward.gold);
            summary.boxes = summary.boxes.saturating_add(def.reward.boxes);
            summary.claimed += 1;
        }
    }
}

impl ObjectiveState {
    pub fn on_equip_swap(&mut self) {
        self.quests.book.bump(Metric::DailyEquipSwaps, 1);
    }

    /// A live kill: counts toward the daily quest and the lifetime total.
    pub fn on_battle_won(&mut self) {
        self.quests.book.bump(Metric::DailyBattleWins, 1);
        self.achievements.bump(Metric::TotalKills, 1);
    }

    /// Offline kills only feed the lifetime total.
    pub fn on_offline_kills(&mut self, kills: u64) {
        self.achievements.bump(Metric::TotalKills, kills);
    }

    pub fn on_skill_triggered(&mut self, count: u64) {
        self.quests.book.bump(Metric::DailySkillTriggers, count);
        self.achievements.bump(Metric::TotalSkillTriggers, count);
    }

    /// Records the first Rare-or-better item; later ones are ignored.
    pub fn on_item_acquired(&mut self, item: &Item) {
        if item.rarity.is_rare_or_better()
            && self.achievements.metric(Metric::RareOrBetterAcquired) == 0
        {
            self.achievements.bump(Metric::RareOrBetterAcquired, 1);
        }
    }

    /// Resets daily quests when `date_key` differs from the last reset.
    /// Returns true if a reset happened.
    pub fn apply_daily_reset(&mut self, date_key: &str) -> bool {
        if self.quests.last_reset_key == date_key {
            return false;
        }
        self.quests.last_reset_key = date_key.to_string();
        self.quests.book = ObjectiveBook::from_defs(QUEST_DEFS);
        true
    }

    /// Marks every claimable entry claimed and returns the summed rewards.
    /// Claiming again yields nothing.
    pub fn claim_all(&mut self) -> ClaimSummary {
        let mut summary = ClaimSummary::default();
        self.quests.book.claim(&mut summary);
        self.achievements.claim(&mut summary);
        summary
    }

    pub fn sync_progress(&mut self) {
        self.quests.book.sync_progress();
        self.achievements.sync_progress();
    }
}
