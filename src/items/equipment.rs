use super::types::{EquipmentSlot, Item, StatBonus};
use serde::{Deserialize, Serialize};

/// Equipped items, one per slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub weapon: Option<Item>,
    pub armor: Option<Item>,
    pub ring: Option<Item>,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipmentSlot) -> &Option<Item> {
        match slot {
            EquipmentSlot::Weapon => &self.weapon,
            EquipmentSlot::Armor => &self.armor,
            EquipmentSlot::Ring => &self.ring,
        }
    }

    pub fn set(&mut self, slot: EquipmentSlot, item: Option<Item>) {
        match slot {
            EquipmentSlot::Weapon => self.weapon = item,
            EquipmentSlot::Armor => self.armor = item,
            EquipmentSlot::Ring => self.ring = item,
        }
    }

    /// Puts `item` into its own slot and hands back whatever was there.
    pub fn swap_in(&mut self, item: Item) -> Option<Item> {
        let slot = item.slot;
        let previous = self.get(slot).clone();
        self.set(slot, Some(item));
        previous
    }

    pub fn take(&mut self, slot: EquipmentSlot) -> Option<Item> {
        let previous = self.get(slot).clone();
        self.set(slot, None);
        previous
    }

    pub fn iter_equipped(&self) -> impl Iterator<Item = &Item> {
        [&self.weapon, &self.armor, &self.ring]
            .into_iter()
            .filter_map(|item| item.as_ref())
    }

    /// Sum over occupied slots of `floor(base stat * rarity multiplier)`.
    pub fn bonuses(&self) -> StatBonus {
        self.iter_equipped()
            .map(Item::effective_stats)
            .fold(StatBonus::default(), |acc, s| StatBonus {
                atk: acc.atk.saturating_add(s.atk),
                hp: acc.hp.saturating_add(s.hp),
            })
    }
}

/// Stat change from replacing `current` with `candidate` in the same slot.
pub fn compare_equipment_delta(current: Option<&Item>, candidate: Option<&Item>) -> (i64, i64) {
    let stats = |item: Option<&Item>| item.map(Item::effective_stats).unwrap_or_default();
    let (now, next) = (stats(current), stats(candidate));
    (
        next.atk as i64 - now.atk as i64,
        next.hp as i64 - now.hp as i64,
    )
}
