//! Immutable lookup tables built from the three content collections.
//!
//! Referential integrity between collections is not assumed. Every lookup
//! that can miss has a resolving variant that falls back to a deterministic
//! default zone or monster instead of failing.

use std::collections::HashMap;

use thiserror::Error;

use super::data::{
    builtin_items, builtin_monsters, builtin_zones, fallback_monster, fallback_zone,
};
use super::types::{ItemDef, MonsterTemplate, ZoneDef};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse {collection} collection: {source}")]
    Parse {
        collection: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone)]
pub struct Catalog {
    zones: Vec<ZoneDef>,
    monsters: Vec<MonsterTemplate>,
    items: Vec<ItemDef>,
    zones_by_id: HashMap<String, usize>,
    monsters_by_id: HashMap<String, usize>,
    items_by_id: HashMap<String, usize>,
}

fn index_by_id<T>(rows: &[T], id: impl Fn(&T) -> &str) -> HashMap<String, usize> {
    let mut index = HashMap::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        index.entry(id(row).to_string()).or_insert(i);
    }
    index
}

impl Catalog {
    /// Joins the three collections into cross-reference indices.
    ///
    /// Rows without an id (and zones without a monster pool) are dropped.
    /// The first row wins when ids collide. The result always holds at
    /// least one zone and one monster template.
    pub fn build(zones: Vec<ZoneDef>, monsters: Vec<MonsterTemplate>, items: Vec<ItemDef>) -> Self {
        let mut monsters: Vec<MonsterTemplate> =
            monsters.into_iter().filter(|m| !m.id.is_empty()).collect();
        if monsters.is_empty() {
            log::warn!("content catalog has no monsters, using fallback template");
            monsters.push(fallback_monster());
        }

        let mut zones: Vec<ZoneDef> = zones
            .into_iter()
            .filter(|z| !z.id.is_empty() && !z.monster_pool.is_empty())
            .collect();
        if zones.is_empty() {
            log::warn!("content catalog has no usable zones, using fallback zone");
            zones.push(fallback_zone(&monsters[0].id));
        }

        let items: Vec<ItemDef> = items.into_iter().filter(|i| !i.id.is_empty()).collect();

        Self {
            zones_by_id: index_by_id(&zones, |z| &z.id),
            monsters_by_id: index_by_id(&monsters, |m| &m.id),
            items_by_id: index_by_id(&items, |i| &i.id),
            zones,
            monsters,
            items,
        }
    }

    /// Parses the three collections from JSON arrays and builds the catalog.
    pub fn from_json(zones: &str, monsters: &str, items: &str) -> Result<Self, CatalogError> {
        let zones = serde_json::from_str(zones).map_err(|source| CatalogError::Parse {
            collection: "zones",
            source,
        })?;
        let monsters = serde_json::from_str(monsters).map_err(|source| CatalogError::Parse {
            collection: "monsters",
            source,
        })?;
        let items = serde_json::from_str(items).map_err(|source| CatalogError::Parse {
            collection: "items",
            source,
        })?;
        Ok(Self::build(zones, monsters, items))
    }

    pub fn builtin() -> Self {
        Self::build(builtin_zones(), builtin_monsters(), builtin_items())
    }

    pub fn zones(&self) -> &[ZoneDef] {
        &self.zones
    }

    pub fn monsters(&self) -> &[MonsterTemplate] {
        &self.monsters
    }

    pub fn items(&self) -> &[ItemDef] {
        &self.items
    }

    pub fn zone(&self, id: &str) -> Option<&ZoneDef> {
        self.zones_by_id.get(id).map(|&i| &self.zones[i])
    }

    pub fn monster(&self, id: &str) -> Option<&MonsterTemplate> {
        self.monsters_by_id.get(id).map(|&i| &self.monsters[i])
    }

    pub fn item(&self, id: &str) -> Option<&ItemDef> {
        self.items_by_id.get(id).map(|&i| &self.items[i])
    }

    /// Display name for a material, falling back to its id.
    pub fn item_name<'a>(&'a self, id: &'a str) -> &'a str {
        match self.item(id) {
            Some(item) if !item.name.is_empty() => &item.name,
            _ => id,
        }
    }

    /// The zone with the lowest unlock threshold (first in catalog order on ties).
    pub fn default_zone(&self) -> &ZoneDef {
        self.zones
            .iter()
            .min_by_key(|z| z.unlock_difficulty.max(1))
            .unwrap_or(&self.zones[0])
    }

    pub fn default_monster(&self) -> &MonsterTemplate {
        &self.monsters[0]
    }

    pub fn resolve_zone(&self, id: &str) -> &ZoneDef {
        self.zone(id).unwrap_or_else(|| self.default_zone())
    }

    /// Picks the monster for the next spawn: the zone's pool is cycled by
    /// kill count, and dangling pool references resolve to the default monster.
    pub fn select_monster_for_zone(&self, zone_id: &str, kill_count: u64) -> &MonsterTemplate {
        let zone = self.resolve_zone(zone_id);
        let index = (kill_count % zone.monster_pool.len() as u64) as usize;
        self.monster(&zone.monster_pool[index])
            .unwrap_or_else(|| self.default_monster())
    }

    /// Zones available at `difficulty_level`, ordered by unlock threshold.
    pub fn unlocked_zones(&self, difficulty_level: u32) -> Vec<&ZoneDef> {
        let level = difficulty_level.max(1);
        let mut unlocked: Vec<&ZoneDef> = self
            .zones
            .iter()
            .filter(|z| z.unlock_difficulty.max(1) <= level)
            .collect();
        unlocked.sort_by_key(|z| z.unlock_difficulty.max(1));
        unlocked
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
