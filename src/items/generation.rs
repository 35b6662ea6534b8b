//! Shop-offer generation: uniform slot, luck-shifted rarity, level-scaled stats.

use super::types::{EquipmentSlot, Item, Rarity, StatBonus};
use crate::core::constants::{
    EPIC_THRESHOLD, LEGENDARY_THRESHOLD, RARE_THRESHOLD, RARITY_LUCK_CAP, RARITY_LUCK_PER_LEVEL,
    SHOP_MIN_PRICE,
};
use rand::Rng;
use uuid::Builder;

/// Luck grows slowly with difficulty and is capped.
pub fn rarity_luck(difficulty_level: u32) -> f64 {
    (difficulty_level.saturating_sub(1) as f64 * RARITY_LUCK_PER_LEVEL).min(RARITY_LUCK_CAP)
}

/// Roll rarity against cumulative thresholds that widen with luck.
pub fn roll_rarity(difficulty_level: u32, rng: &mut impl Rng) -> Rarity {
    let roll = rng.gen::<f64>();
    let luck = rarity_luck(difficulty_level);

    if roll < LEGENDARY_THRESHOLD + luck * 0.4 {
        Rarity::Legendary
    } else if roll < EPIC_THRESHOLD + luck * 0.7 {
        Rarity::Epic
    } else if roll < RARE_THRESHOLD + luck {
        Rarity::Rare
    } else {
        Rarity::Common
    }
}

pub fn roll_random_slot(rng: &mut impl Rng) -> EquipmentSlot {
    EquipmentSlot::ALL[rng.gen_range(0..EquipmentSlot::ALL.len())]
}

fn base_stats_for(slot: EquipmentSlot, difficulty_level: u32) -> StatBonus {
    let level = difficulty_level.max(1) as f64;
    match slot {
        EquipmentSlot::Weapon => StatBonus {
            atk: 3 + (level * 0.45).floor() as u32,
            hp: 0,
        },
        EquipmentSlot::Armor => StatBonus {
            atk: 0,
            hp: 12 + (level * 1.7).floor() as u32,
        },
        EquipmentSlot::Ring => StatBonus {
            atk: 1 + (level * 0.2).floor() as u32,
            hp: 5 + (level * 0.7).floor() as u32,
        },
    }
}

fn base_names(slot: EquipmentSlot) -> &'static [&'static str] {
    match slot {
        EquipmentSlot::Weapon => &["Sword", "Axe", "Spear"],
        EquipmentSlot::Armor => &["Mail", "Breastplate", "Robe"],
        EquipmentSlot::Ring => &["Band", "Signet", "Spellring"],
    }
}

/// Purchase price: attack is weighted three times hit points.
pub fn shop_price(base_stats: StatBonus, rarity: Rarity) -> u64 {
    let raw = (base_stats.atk as f64 * 3.0 + base_stats.hp as f64) * rarity.stat_multiplier();
    (raw.floor() as u64).max(SHOP_MIN_PRICE)
}

/// A fresh item id drawn from the supplied generator.
pub fn generate_item_id(rng: &mut impl Rng) -> String {
    Builder::from_random_bytes(rng.gen()).into_uuid().to_string()
}

/// Generate a shop offer (also used for reward boxes) at the given difficulty.
pub fn generate_shop_item(difficulty_level: u32, rng: &mut impl Rng) -> Item {
    let slot = roll_random_slot(rng);
    let rarity = roll_rarity(difficulty_level, rng);
    let base_stats = base_stats_for(slot, difficulty_level);

    let names = base_names(slot);
    let base_name = names[rng.gen_range(0..names.len())];

    Item {
        id: generate_item_id(rng),
        name: format!("{} {}", rarity.name(), base_name),
        slot,
        rarity,
        base_stats,
        value: shop_price(base_stats, rarity),
    }
}
