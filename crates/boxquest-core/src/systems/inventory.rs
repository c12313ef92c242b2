//! Inventory system - taking, dropping, equipping and using items

use hecs::World;
use log::debug;

use boxquest_logic::{BoxId, Item, ItemId, Npc, PlayerId};

use super::combat::strike_hostile;
use crate::components::Power;
use crate::error::SessionError;
use crate::lookup;
use crate::turn::TurnEvent;

/// Pick an item up off the floor.
pub fn take(
    world: &mut World,
    player: PlayerId,
    item: ItemId,
) -> Result<Vec<TurnEvent>, SessionError> {
    update_item(world, item, |i| {
        i.box_id = None;
        i.player = Some(player);
        i.equipped = false;
    })?;
    debug!("Took {:?}", item);
    Ok(vec![TurnEvent::Took(item)])
}

/// Put a carried item down in `at`. Dropping unequips it.
pub fn drop_item(
    world: &mut World,
    item: ItemId,
    at: BoxId,
) -> Result<Vec<TurnEvent>, SessionError> {
    update_item(world, item, |i| {
        i.box_id = Some(at);
        i.player = None;
        i.equipped = false;
    })?;
    debug!("Dropped {:?} in {}", item, at);
    Ok(vec![TurnEvent::Dropped(item)])
}

/// Equip a carried item. Anything else the player had equipped is unequipped.
pub fn equip(world: &mut World, player: PlayerId, item: ItemId) -> Result<(), SessionError> {
    let carried = lookup::item_entity(world, item)
        .and_then(|e| world.get::<&Item>(e).ok().map(|i| i.is_carried_by(player)))
        .ok_or(SessionError::UnknownItem(item))?;
    if !carried {
        return Err(SessionError::NotCarried(item));
    }
    for (_, i) in world.query_mut::<&mut Item>() {
        if i.is_carried_by(player) {
            i.equipped = i.id == item;
        }
    }
    debug!("Equipped {:?}", item);
    Ok(())
}

/// Strike the live hostile in `at` with the equipped item. With nothing to
/// hit the turn just passes.
pub fn use_item(
    world: &mut World,
    item: ItemId,
    at: BoxId,
) -> Result<Vec<TurnEvent>, SessionError> {
    let entity = lookup::item_entity(world, item).ok_or(SessionError::UnknownItem(item))?;
    let power = world.get::<&Power>(entity).map(|p| p.0).unwrap_or(0);

    let target_alive = lookup::npc_entity_at(world, at)
        .is_some_and(|(e, _)| world.get::<&Npc>(e).is_ok_and(|n| n.is_alive()));
    if !target_alive {
        return Ok(vec![TurnEvent::Idle]);
    }

    let mut events = vec![TurnEvent::Used {
        item,
        damage: power,
    }];
    strike_hostile(world, at, power, &mut events)?;
    Ok(events)
}

fn update_item(
    world: &World,
    item: ItemId,
    f: impl FnOnce(&mut Item),
) -> Result<(), SessionError> {
    let entity = lookup::item_entity(world, item).ok_or(SessionError::UnknownItem(item))?;
    let mut record = world
        .get::<&mut Item>(entity)
        .map_err(|_| SessionError::UnknownItem(item))?;
    f(&mut *record);
    Ok(())
}
