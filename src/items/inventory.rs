use super::drops::{merge_drops, DropResult};
use super::types::Item;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryState {
    /// Material id -> quantity.
    pub materials: BTreeMap<String, u64>,
    /// Owned equipment that is not currently equipped.
    pub equipment: Vec<Item>,
    /// Current shop offer; replaced after every purchase and kill.
    pub shop_offer: Option<Item>,
    /// Drops from the most recent kill (transient, for display).
    #[serde(skip)]
    pub last_drop: Vec<DropResult>,
}

impl InventoryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_drops(&mut self, drops: Vec<DropResult>) {
        merge_drops(&mut self.materials, &drops);
        self.last_drop = drops;
    }

    pub fn material_count(&self, item_id: &str) -> u64 {
        self.materials.get(item_id).copied().unwrap_or(0)
    }

    pub fn find_item(&self, item_id: &str) -> Option<&Item> {
        self.equipment.iter().find(|i| i.id == item_id)
    }

    /// Removes an owned item by id.
    pub fn take_item(&mut self, item_id: &str) -> Option<Item> {
        let index = self.equipment.iter().position(|i| i.id == item_id)?;
        Some(self.equipment.remove(index))
    }
}
