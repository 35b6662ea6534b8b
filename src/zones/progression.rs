//! Zone progression state and logic.

use serde::{Deserialize, Serialize};

use crate::content::Catalog;

/// Tracks the current zone and the set of zones the player has reached.
///
/// `unlocked_zone_ids` only ever grows and stays ordered by unlock threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneProgression {
    pub current_zone_id: String,
    pub unlocked_zone_ids: Vec<String>,
}

impl ZoneProgression {
    /// Starts in the catalog's default zone with every level-1 zone unlocked.
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            current_zone_id: catalog.default_zone().id.clone(),
            unlocked_zone_ids: unlocked_zone_ids(catalog, 1),
        }
    }

    pub fn is_zone_unlocked(&self, zone_id: &str) -> bool {
        self.unlocked_zone_ids.iter().any(|id| id == zone_id)
    }

    /// Adds every zone available at `difficulty_level` and returns the ids
    /// that were not unlocked before, in threshold order.
    pub fn sync_with_difficulty(
        &mut self,
        catalog: &Catalog,
        difficulty_level: u32,
    ) -> Vec<String> {
        let newly: Vec<String> = unlocked_zone_ids(catalog, difficulty_level)
            .into_iter()
            .filter(|id| !self.is_zone_unlocked(id))
            .collect();
        if !newly.is_empty() {
            self.unlocked_zone_ids.extend(newly.iter().cloned());
            self.sort_by_threshold(catalog);
        }
        newly
    }

    /// Unions stored ids with the derived set, dropping ids the catalog does
    /// not know. Used when restoring from a save.
    pub fn merge_stored(&mut self, catalog: &Catalog, stored: &[String], difficulty_level: u32) {
        for id in stored {
            if catalog.zone(id).is_some() && !self.is_zone_unlocked(id) {
                self.unlocked_zone_ids.push(id.clone());
            }
        }
        self.sync_with_difficulty(catalog, difficulty_level);
        self.sort_by_threshold(catalog);
    }

    fn sort_by_threshold(&mut self, catalog: &Catalog) {
        self.unlocked_zone_ids.sort_by_key(|id| {
            catalog
                .zone(id)
                .map(|z| z.unlock_difficulty.max(1))
                .unwrap_or(u32::MAX)
        });
    }
}

/// Ids of the zones unlocked at `difficulty_level`, ordered by threshold.
pub fn unlocked_zone_ids(catalog: &Catalog, difficulty_level: u32) -> Vec<String> {
    catalog
        .unlocked_zones(difficulty_level)
        .into_iter()
        .map(|z| z.id.clone())
        .collect()
}
