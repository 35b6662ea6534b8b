use crate::content::DropEntry;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A material stack produced by one drop-table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropResult {
    pub item_id: String,
    pub quantity: u64,
}

/// Roll every row of a drop table independently.
///
/// A row drops when the roll does not exceed its (clamped) chance; the
/// quantity is then drawn uniformly from its normalized `[min, max]`.
pub fn roll_drop_table(table: &[DropEntry], rng: &mut impl Rng) -> Vec<DropResult> {
    let mut results = Vec::new();

    for entry in table {
        let chance = if entry.chance.is_finite() {
            entry.chance.clamp(0.0, 1.0)
        } else {
            0.0
        };
        if chance <= 0.0 || rng.gen::<f64>() > chance {
            continue;
        }

        let (min, max) = entry.quantity_range();
        let quantity = rng.gen_range(min..=max) as u64;
        results.push(DropResult {
            item_id: entry.item_id.clone(),
            quantity,
        });
    }

    results
}

/// Add dropped stacks to a material map.
pub fn merge_drops(materials: &mut BTreeMap<String, u64>, drops: &[DropResult]) {
    for drop in drops {
        let qty = materials.entry(drop.item_id.clone()).or_insert(0);
        *qty = qty.saturating_add(drop.quantity);
    }
}
