//! Built-in content used when no external catalog is supplied.

use super::types::{DropEntry, ItemDef, MonsterTemplate, ZoneDef};

/// Zone used when a catalog has no valid zones at all.
pub const FALLBACK_ZONE_ID: &str = "outskirts";
/// Monster used when a catalog has no valid monster templates at all.
pub const FALLBACK_MONSTER_ID: &str = "slime";

fn zone(id: &str, name: &str, unlock_difficulty: u32, pool: &[&str]) -> ZoneDef {
    ZoneDef {
        id: id.to_string(),
        name: name.to_string(),
        unlock_difficulty,
        monster_pool: pool.iter().map(|m| m.to_string()).collect(),
    }
}

fn monster(
    id: &str,
    name: &str,
    (base_hp, base_atk, base_gold): (u32, u32, u32),
    attack_cooldown_ms: Option<u32>,
    drop_table: Vec<DropEntry>,
) -> MonsterTemplate {
    MonsterTemplate {
        id: id.to_string(),
        name: name.to_string(),
        base_hp,
        base_atk,
        base_gold,
        attack_cooldown_ms,
        drop_table,
    }
}

fn item(id: &str, name: &str, description: &str) -> ItemDef {
    ItemDef {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
    }
}

pub fn fallback_zone(monster_id: &str) -> ZoneDef {
    zone(FALLBACK_ZONE_ID, "Outskirts", 1, &[monster_id])
}

pub fn fallback_monster() -> MonsterTemplate {
    monster(FALLBACK_MONSTER_ID, "Green Slime", (40, 5, 6), None, vec![])
}

pub fn builtin_zones() -> Vec<ZoneDef> {
    vec![
        zone("meadow", "Sunlit Meadow", 1, &["slime", "goblin"]),
        zone("cavern", "Echoing Cavern", 5, &["cave_bat", "goblin", "rock_wyrm"]),
        zone("ruins", "Sunken Ruins", 12, &["skeleton", "rock_wyrm", "ogre"]),
        zone("citadel", "Twilight Citadel", 25, &["ogre", "twilight_lich"]),
    ]
}

pub fn builtin_monsters() -> Vec<MonsterTemplate> {
    vec![
        monster(
            "slime",
            "Green Slime",
            (40, 5, 6),
            None,
            vec![DropEntry::new("slime_gel", 0.5, 1, 2)],
        ),
        monster(
            "goblin",
            "Cave Goblin",
            (55, 7, 9),
            None,
            vec![
                DropEntry::new("goblin_ear", 0.35, 1, 1),
                DropEntry::new("iron_scrap", 0.15, 1, 2),
            ],
        ),
        monster(
            "cave_bat",
            "Cave Bat",
            (48, 9, 11),
            Some(900),
            vec![DropEntry::new("bat_wing", 0.4, 1, 2)],
        ),
        monster(
            "rock_wyrm",
            "Rock Wyrm",
            (90, 12, 18),
            None,
            vec![
                DropEntry::new("wyrm_scale", 0.25, 1, 2),
                DropEntry::new("iron_scrap", 0.3, 1, 3),
            ],
        ),
        monster(
            "skeleton",
            "Restless Skeleton",
            (80, 14, 20),
            None,
            vec![DropEntry::new("bone_dust", 0.45, 1, 3)],
        ),
        monster(
            "ogre",
            "Swamp Ogre",
            (140, 18, 32),
            Some(1_600),
            vec![
                DropEntry::new("ogre_hide", 0.3, 1, 1),
                DropEntry::new("iron_scrap", 0.4, 2, 4),
            ],
        ),
        monster(
            "twilight_lich",
            "Twilight Lich",
            (220, 26, 55),
            None,
            vec![
                DropEntry::new("lich_ember", 0.2, 1, 1),
                DropEntry::new("bone_dust", 0.5, 2, 5),
            ],
        ),
    ]
}

pub fn builtin_items() -> Vec<ItemDef> {
    vec![
        item("slime_gel", "Slime Gel", "Sticky residue. Sells for very little."),
        item("goblin_ear", "Goblin Ear", "Proof of a goblin hunt."),
        item("iron_scrap", "Iron Scrap", "Bent metal, good for smelting."),
        item("bat_wing", "Bat Wing", "Leathery and light."),
        item("wyrm_scale", "Wyrm Scale", "Hard as river stone."),
        item("bone_dust", "Bone Dust", "Fine grey powder."),
        item("ogre_hide", "Ogre Hide", "Thick enough to stop an arrow."),
        item("lich_ember", "Lich Ember", "A cold flame that never goes out."),
    ]
}
