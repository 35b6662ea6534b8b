//! Simulation report generation.

use serde::Serialize;

use super::config::SimConfig;
use crate::core::offline::OfflineReward;

/// What one live run produced, next to the offline estimates for the same
/// span starting from the same state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunStats {
    pub frames: u64,
    pub ticks: u64,
    pub kills: u64,
    pub gold: u64,
    pub difficulty_level: u32,
    pub deaths: u64,
    pub skill_triggers: u64,
    pub unlocked_zones: usize,
    pub closed_form: OfflineReward,
    pub replay: OfflineReward,
}

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimReport {
    pub num_runs: u32,
    pub seconds: u64,
    pub frame_ms: f64,

    pub avg_kills: f64,
    pub avg_gold: f64,
    pub avg_difficulty: f64,
    pub avg_deaths: f64,
    pub avg_skill_triggers: f64,

    pub avg_closed_form_kills: f64,
    pub avg_closed_form_gold: f64,
    pub avg_replay_kills: f64,
    pub avg_replay_gold: f64,

    pub runs: Vec<RunStats>,
}

fn average(runs: &[RunStats], f: impl Fn(&RunStats) -> f64) -> f64 {
    if runs.is_empty() {
        return 0.0;
    }
    runs.iter().map(f).sum::<f64>() / runs.len() as f64
}

/// `estimate / live`, or `None` when the live side is zero.
fn ratio(estimate: f64, live: f64) -> Option<f64> {
    (live > 0.0).then(|| estimate / live)
}

impl SimReport {
    /// Create a new report from completed run stats.
    pub fn from_runs(runs: Vec<RunStats>, config: &SimConfig) -> Self {
        Self {
            num_runs: runs.len() as u32,
            seconds: config.seconds,
            frame_ms: config.effective_frame_ms(),
            avg_kills: average(&runs, |r| r.kills as f64),
            avg_gold: average(&runs, |r| r.gold as f64),
            avg_difficulty: average(&runs, |r| r.difficulty_level as f64),
            avg_deaths: average(&runs, |r| r.deaths as f64),
            avg_skill_triggers: average(&runs, |r| r.skill_triggers as f64),
            avg_closed_form_kills: average(&runs, |r| r.closed_form.kills_gained as f64),
            avg_closed_form_gold: average(&runs, |r| r.closed_form.gold_gained as f64),
            avg_replay_kills: average(&runs, |r| r.replay.kills_gained as f64),
            avg_replay_gold: average(&runs, |r| r.replay.gold_gained as f64),
            runs,
        }
    }

    /// Closed-form estimated kills as a fraction of live kills.
    pub fn closed_form_kill_ratio(&self) -> Option<f64> {
        ratio(self.avg_closed_form_kills, self.avg_kills)
    }

    /// Replay estimated kills as a fraction of live kills.
    pub fn replay_kill_ratio(&self) -> Option<f64> {
        ratio(self.avg_replay_kills, self.avg_kills)
    }

    pub fn to_text(&self) -> String {
        let fmt_ratio = |r: Option<f64>| match r {
            Some(r) => format!("{:.2}", r),
            None => "n/a".to_string(),
        };

        let mut report = String::new();
        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");
        report.push_str(&format!(
            "Runs: {}, {}s each at {:.1}ms frames\n\n",
            self.num_runs, self.seconds, self.frame_ms
        ));

        report.push_str("── LIVE ─────────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Kills:           {:.1}\n", self.avg_kills));
        report.push_str(&format!("  Avg Gold:            {:.1}\n", self.avg_gold));
        report.push_str(&format!("  Avg Difficulty:      {:.1}\n", self.avg_difficulty));
        report.push_str(&format!("  Avg Deaths:          {:.1}\n", self.avg_deaths));
        report.push_str(&format!(
            "  Avg Skill Triggers:  {:.1}\n\n",
            self.avg_skill_triggers
        ));

        report.push_str("── OFFLINE ESTIMATE ─────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Closed form:  {:.1} kills, {:.1} gold (kill ratio {})\n",
            self.avg_closed_form_kills,
            self.avg_closed_form_gold,
            fmt_ratio(self.closed_form_kill_ratio())
        ));
        report.push_str(&format!(
            "  Replay:       {:.1} kills, {:.1} gold (kill ratio {})\n",
            self.avg_replay_kills,
            self.avg_replay_gold,
            fmt_ratio(self.replay_kill_ratio())
        ));

        report
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
