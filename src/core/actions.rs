//! User-initiated actions.
//!
//! Every action takes the current snapshot and returns a new one. An `Err`
//! is a rejected action: the caller keeps the snapshot it already holds and
//! may show the error's message to the player.

use rand::Rng;
use thiserror::Error;

use super::game_state::GameState;
use super::progression::recompute_player_stats;
use crate::combat::spawn_monster;
use crate::content::Catalog;
use crate::items::{generate_shop_item, EquipmentSlot};
use crate::objectives::{date_key, ClaimSummary};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("Not enough gold: need {needed}, have {available}")]
    InsufficientGold { needed: u64, available: u64 },
    #[error("No item with id {0} in the inventory")]
    UnknownItem(String),
    #[error("Nothing is equipped in the {} slot", .0.name())]
    SlotEmpty(EquipmentSlot),
    #[error("Zone {0} is still locked")]
    ZoneLocked(String),
    #[error("Unknown zone {0}")]
    UnknownZone(String),
    #[error("Nothing to claim")]
    NothingToClaim,
    #[error("The shop has nothing for sale")]
    NoShopOffer,
}

/// Buys the current shop offer into the inventory and rolls a new one.
pub fn purchase_shop_offer(
    state: &GameState,
    rng: &mut impl Rng,
) -> Result<GameState, ActionError> {
    let offer = state
        .inventory
        .shop_offer
        .as_ref()
        .ok_or(ActionError::NoShopOffer)?;
    if state.gold < offer.value {
        return Err(ActionError::InsufficientGold {
            needed: offer.value,
            available: state.gold,
        });
    }

    let mut next = state.clone();
    let item = offer.clone();
    next.gold -= item.value;
    next.objectives.on_item_acquired(&item);
    log::debug!("Purchased {} for {} gold", item.name, item.value);
    next.inventory.equipment.push(item);
    next.inventory.shop_offer = Some(generate_shop_item(next.progression.difficulty_level, rng));
    Ok(next)
}

/// Moves an owned item into its slot; the previous occupant returns to the
/// inventory.
pub fn equip_item(state: &GameState, item_id: &str) -> Result<GameState, ActionError> {
    if state.inventory.find_item(item_id).is_none() {
        return Err(ActionError::UnknownItem(item_id.to_string()));
    }

    let mut next = state.clone();
    let item = next
        .inventory
        .take_item(item_id)
        .ok_or_else(|| ActionError::UnknownItem(item_id.to_string()))?;
    if let Some(previous) = next.player.equipment.swap_in(item) {
        next.inventory.equipment.push(previous);
    }
    recompute_player_stats(&mut next.player, &next.progression.upgrades);
    next.objectives.on_equip_swap();
    Ok(next)
}

pub fn unequip(state: &GameState, slot: EquipmentSlot) -> Result<GameState, ActionError> {
    if state.player.equipment.get(slot).is_none() {
        return Err(ActionError::SlotEmpty(slot));
    }

    let mut next = state.clone();
    let item = next
        .player
        .equipment
        .take(slot)
        .ok_or(ActionError::SlotEmpty(slot))?;
    next.inventory.equipment.push(item);
    recompute_player_stats(&mut next.player, &next.progression.upgrades);
    Ok(next)
}

/// Switches the fighting zone and respawns the monster there.
pub fn change_zone(
    state: &GameState,
    zone_id: &str,
    catalog: &Catalog,
) -> Result<GameState, ActionError> {
    if catalog.zone(zone_id).is_none() {
        return Err(ActionError::UnknownZone(zone_id.to_string()));
    }
    if !state.progression.zones.is_zone_unlocked(zone_id) {
        return Err(ActionError::ZoneLocked(zone_id.to_string()));
    }

    let mut next = state.clone();
    next.progression.zones.current_zone_id = zone_id.to_string();
    next.monster = spawn_monster(
        catalog,
        zone_id,
        next.progression.difficulty_level,
        next.progression.kill_count,
    );
    log::info!("Moved to zone {}", zone_id);
    Ok(next)
}

/// Collects every claimable quest and achievement reward in one go.
///
/// Each reward box becomes one shop-generated item at the current
/// difficulty, added to the inventory.
pub fn claim_objective_rewards(
    state: &GameState,
    rng: &mut impl Rng,
) -> Result<(GameState, ClaimSummary), ActionError> {
    if state.objectives.claimable_count() == 0 {
        return Err(ActionError::NothingToClaim);
    }

    let mut next = state.clone();
    let summary = next.objectives.claim_all();
    next.gold = next.gold.saturating_add(summary.gold);
    for _ in 0..summary.boxes {
        let item = generate_shop_item(next.progression.difficulty_level, rng);
        next.objectives.on_item_acquired(&item);
        next.inventory.equipment.push(item);
    }
    log::info!(
        "Claimed {} objectives: +{} gold, {} boxes",
        summary.claimed,
        summary.gold,
        summary.boxes
    );
    Ok((next, summary))
}

/// Resets daily quests if the local date of `now_ms` differs from the last
/// reset. Returns an unchanged copy otherwise.
pub fn refresh_daily_objectives(state: &GameState, now_ms: i64) -> GameState {
    let mut next = state.clone();
    if next.objectives.apply_daily_reset(&date_key(now_ms)) {
        log::info!("Daily quests reset for {}", next.objectives.quests.last_reset_key);
    }
    next
}
