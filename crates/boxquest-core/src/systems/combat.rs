//! Combat system - player against the hostile sharing their box

use hecs::World;
use log::info;

use boxquest_logic::{BoxId, CombatAction, Npc, PlayerId};

use super::with_vitals;
use crate::components::{Strike, Vitals};
use crate::error::SessionError;
use crate::lookup;
use crate::turn::TurnEvent;

/// Hit the hostile with the player's attack. A survivor strikes back in full.
pub fn attack(
    world: &mut World,
    player: PlayerId,
    at: BoxId,
) -> Result<Vec<TurnEvent>, SessionError> {
    let attack = with_vitals(world, player, |v: &mut Vitals| v.attack)
        .ok_or(SessionError::PlayerNotPlaced)?;
    let mut events = Vec::new();
    let survived = strike_hostile(world, at, attack, &mut events)?;
    if survived {
        retaliate(world, player, at, 1, &mut events);
    }
    Ok(events)
}

/// Brace against the hostile, taking half its strike.
pub fn block(
    world: &mut World,
    player: PlayerId,
    at: BoxId,
) -> Result<Vec<TurnEvent>, SessionError> {
    if lookup::npc_entity_at(world, at).is_none() {
        return Err(SessionError::IllegalAction {
            action: CombatAction::Block.into(),
            at,
        });
    }
    let mut events = Vec::new();
    retaliate(world, player, at, 2, &mut events);
    Ok(events)
}

/// Wound the hostile at `at` by `damage`. Returns whether it is still alive.
pub(crate) fn strike_hostile(
    world: &mut World,
    at: BoxId,
    damage: u32,
    events: &mut Vec<TurnEvent>,
) -> Result<bool, SessionError> {
    let (entity, id) = lookup::npc_entity_at(world, at).ok_or(SessionError::IllegalAction {
        action: CombatAction::Attack.into(),
        at,
    })?;
    let mut npc = world
        .get::<&mut Npc>(entity)
        .map_err(|_| SessionError::UnknownBox(at))?;
    let dealt = npc.stat.wound(damage);
    let remaining = npc.stat.current_health;
    events.push(TurnEvent::Struck {
        npc: id,
        damage: dealt,
        remaining,
    });
    if remaining == 0 {
        info!("{} defeated at {}", npc.name, at);
        events.push(TurnEvent::Defeated { npc: id });
    }
    Ok(remaining > 0)
}

/// The hostile at `at` hits the player for its strike divided by `divisor`.
fn retaliate(
    world: &World,
    player: PlayerId,
    at: BoxId,
    divisor: u32,
    events: &mut Vec<TurnEvent>,
) {
    let Some((entity, by)) = lookup::npc_entity_at(world, at) else {
        return;
    };
    if !world.get::<&Npc>(entity).is_ok_and(|n| n.is_alive()) {
        return;
    }
    let Ok(strike) = world.get::<&Strike>(entity).map(|s| s.0) else {
        return;
    };
    let damage = strike / divisor.max(1);
    if let Some(remaining) = with_vitals(world, player, |v| {
        v.stat.wound(damage);
        v.stat.current_health
    }) {
        events.push(TurnEvent::Hit {
            by,
            damage,
            remaining,
        });
    }
}
