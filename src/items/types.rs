use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentSlot {
    Weapon,
    Armor,
    Ring,
}

impl EquipmentSlot {
    pub const ALL: [EquipmentSlot; 3] = [
        EquipmentSlot::Weapon,
        EquipmentSlot::Armor,
        EquipmentSlot::Ring,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EquipmentSlot::Weapon => "Weapon",
            EquipmentSlot::Armor => "Armor",
            EquipmentSlot::Ring => "Ring",
        }
    }

    /// Parses the lowercase wire name used in save files.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "weapon" => Some(EquipmentSlot::Weapon),
            "armor" => Some(EquipmentSlot::Armor),
            "ring" => Some(EquipmentSlot::Ring),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common = 0,
    Rare = 1,
    Epic = 2,
    Legendary = 3,
}

impl Rarity {
    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
        }
    }

    /// Multiplier applied to an item's base stats and price.
    pub fn stat_multiplier(&self) -> f64 {
        match self {
            Rarity::Common => 1.0,
            Rarity::Rare => 1.25,
            Rarity::Epic => 1.6,
            Rarity::Legendary => 2.0,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Common" => Some(Rarity::Common),
            "Rare" => Some(Rarity::Rare),
            "Epic" => Some(Rarity::Epic),
            "Legendary" => Some(Rarity::Legendary),
            _ => None,
        }
    }

    pub fn is_rare_or_better(&self) -> bool {
        *self >= Rarity::Rare
    }
}

/// Flat stat contribution. Used both for an item's base stats and for
/// the summed equipment bonus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatBonus {
    pub atk: u32,
    #[serde(alias = "maxHp")]
    pub hp: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub name: String,
    pub slot: EquipmentSlot,
    pub rarity: Rarity,
    pub base_stats: StatBonus,
    /// Shop price in gold.
    pub value: u64,
}

impl Item {
    /// This item's contribution once rarity is applied.
    pub fn effective_stats(&self) -> StatBonus {
        let mult = self.rarity.stat_multiplier();
        StatBonus {
            atk: (self.base_stats.atk as f64 * mult).floor() as u32,
            hp: (self.base_stats.hp as f64 * mult).floor() as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rarity_ordering() {
        assert!(Rarity::Common < Rarity::Rare);
        assert!(Rarity::Rare < Rarity::Epic);
        assert!(Rarity::Epic < Rarity::Legendary);
        assert!(!Rarity::Common.is_rare_or_better());
        assert!(Rarity::Rare.is_rare_or_better());
    }

    #[test]
    fn test_effective_stats_floor_rarity_multiplier() {
        let item = Item {
            id: "a".to_string(),
            name: "Epic Ring".to_string(),
            slot: EquipmentSlot::Ring,
            rarity: Rarity::Epic,
            base_stats: StatBonus { atk: 3, hp: 7 },
            value: 10,
        };
        // 3 * 1.6 = 4.8, 7 * 1.6 = 11.2
        assert_eq!(item.effective_stats(), StatBonus { atk: 4, hp: 11 });
    }

    #[test]
    fn test_slot_wire_names() {
        for slot in EquipmentSlot::ALL {
            let json = serde_json::to_string(&slot).unwrap();
            let key = json.trim_matches('"');
            assert_eq!(EquipmentSlot::from_key(key), Some(slot));
        }
        assert_eq!(EquipmentSlot::from_key("shield"), None);
    }
}
