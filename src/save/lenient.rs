//! Forgiving readers over parsed JSON.
//!
//! Numbers may arrive as integers, floats (floored) or numeric strings;
//! anything else reads as missing so the caller's default applies.

use serde_json::{Map, Value};

use crate::items::{EquipmentSlot, Item, Rarity, StatBonus};

/// Looks up `key` when `value` is an object.
pub fn field<'a>(value: Option<&'a Value>, key: &str) -> Option<&'a Value> {
    value.and_then(Value::as_object).and_then(|obj| obj.get(key))
}

pub fn object(value: Option<&Value>) -> Option<&Map<String, Value>> {
    value.and_then(Value::as_object)
}

/// A finite number, floored.
pub fn number(value: Option<&Value>) -> Option<f64> {
    let raw = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    raw.is_finite().then(|| raw.floor())
}

pub fn int(value: Option<&Value>) -> Option<i64> {
    number(value).map(|n| n.clamp(i64::MIN as f64, i64::MAX as f64) as i64)
}

/// Non-negative integer, or `default` when missing.
pub fn u64_or(value: Option<&Value>, default: u64) -> u64 {
    match number(value) {
        Some(n) => n.clamp(0.0, u64::MAX as f64) as u64,
        None => default,
    }
}

pub fn u32_or(value: Option<&Value>, default: u32) -> u32 {
    match number(value) {
        Some(n) => n.clamp(0.0, u32::MAX as f64) as u32,
        None => default,
    }
}

pub fn string(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

pub fn boolean(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::Bool(true)))
}

pub fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn parse_rarity(value: Option<&Value>) -> Rarity {
    let Some(name) = string(value) else {
        return Rarity::Common;
    };
    [Rarity::Common, Rarity::Rare, Rarity::Epic, Rarity::Legendary]
        .into_iter()
        .find(|r| r.name().eq_ignore_ascii_case(name))
        .unwrap_or(Rarity::Common)
}

/// Normalizes one stored item. Unknown slots drop the item; unknown
/// rarities read as Common. `fallback_id` is used when the id is missing.
pub fn item(value: &Value, fallback_id: impl FnOnce() -> String) -> Option<Item> {
    let value = Some(value);
    object(value)?;
    let slot = string(field(value, "slot"))
        .and_then(|s| EquipmentSlot::from_key(&s.to_ascii_lowercase()))?;
    let rarity = parse_rarity(field(value, "rarity"));

    let stats = field(value, "baseStats");
    let hp = field(stats, "hp").or_else(|| field(stats, "maxHp"));
    let base_stats = StatBonus {
        atk: u32_or(field(stats, "atk"), 0),
        hp: u32_or(hp, 0),
    };

    let id = string(field(value, "id"))
        .map(str::to_string)
        .unwrap_or_else(fallback_id);
    let name = string(field(value, "name"))
        .map(str::to_string)
        .unwrap_or_else(|| format!("{} {}", rarity.name(), slot.name()));

    Some(Item {
        id,
        name,
        slot,
        rarity,
        base_stats,
        value: u64_or(field(value, "value"), 1),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_number_forms() {
        assert_eq!(number(Some(&json!(12))), Some(12.0));
        assert_eq!(number(Some(&json!(12.9))), Some(12.0));
        assert_eq!(number(Some(&json!(" 7 "))), Some(7.0));
        assert_eq!(number(Some(&json!("abc"))), None);
        assert_eq!(number(Some(&json!(null))), None);
        assert_eq!(number(Some(&json!([1]))), None);
        assert_eq!(number(None), None);
    }

    #[test]
    fn test_unsigned_clamps_negative() {
        assert_eq!(u64_or(Some(&json!(-5)), 9), 0);
        assert_eq!(u64_or(Some(&json!("x")), 9), 9);
        assert_eq!(u32_or(Some(&json!(1e20)), 0), u32::MAX);
    }

    #[test]
    fn test_field_on_non_object() {
        let v = json!([1, 2]);
        assert!(field(Some(&v), "a").is_none());
        assert!(field(None, "a").is_none());
    }

    #[test]
    fn test_item_normalization() {
        let raw = json!({
            "id": "x1",
            "slot": "Armor",
            "rarity": "epic",
            "baseStats": { "maxHp": "20" },
            "value": -3
        });
        let item = item(&raw, || "fallback".to_string()).unwrap();
        assert_eq!(item.id, "x1");
        assert_eq!(item.slot, EquipmentSlot::Armor);
        assert_eq!(item.rarity, Rarity::Epic);
        assert_eq!(item.base_stats, StatBonus { atk: 0, hp: 20 });
        assert_eq!(item.value, 0);
        assert_eq!(item.name, "Epic Armor");
    }

    #[test]
    fn test_item_unknown_slot_dropped() {
        let raw = json!({ "id": "x", "slot": "shield" });
        assert!(item(&raw, || "f".to_string()).is_none());
        assert!(item(&json!("nope"), || "f".to_string()).is_none());
    }

    #[test]
    fn test_item_unknown_rarity_is_common() {
        let raw = json!({ "slot": "ring", "rarity": "mythic" });
        let item = item(&raw, || "gen-1".to_string()).unwrap();
        assert_eq!(item.rarity, Rarity::Common);
        assert_eq!(item.id, "gen-1");
    }
}
