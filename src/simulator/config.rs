//! Simulation configuration.

use serde::{Deserialize, Serialize};

use crate::core::offline::OfflineConfig;

/// Configuration for a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimConfig {
    /// Number of simulation runs to perform
    pub num_runs: u32,

    /// Simulated seconds of live play per run
    pub seconds: u64,

    /// Real time fed to each `advance()` call, in milliseconds
    pub frame_ms: f64,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Offline settings the estimate is computed with
    pub offline: OfflineConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 1,
            seconds: 600,
            frame_ms: 16.0,
            seed: None,
            offline: OfflineConfig::default(),
        }
    }
}

impl SimConfig {
    /// Frame length used by the runner; falls back to one logical tick.
    pub fn effective_frame_ms(&self) -> f64 {
        if self.frame_ms.is_finite() && self.frame_ms > 0.0 {
            self.frame_ms
        } else {
            crate::core::constants::TICK_INTERVAL_MS as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SimConfig = serde_json::from_str(r#"{"seconds": 30, "seed": 7}"#).unwrap();
        assert_eq!(config.seconds, 30);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.num_runs, 1);
        assert_eq!(config.frame_ms, 16.0);
    }

    #[test]
    fn test_bad_frame_falls_back_to_tick() {
        let config = SimConfig {
            frame_ms: -5.0,
            ..Default::default()
        };
        assert_eq!(config.effective_frame_ms(), 100.0);
    }
}
