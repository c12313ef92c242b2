//! Movement system - stepping between boxes and fleeing

use hecs::World;
use log::debug;
use rand::seq::IteratorRandom;
use rand::Rng;

use boxquest_logic::{ActionCode, BoxId, Direction, GridBox, PlayerId};

use super::{effects, place_player};
use crate::config::Tuning;
use crate::error::SessionError;
use crate::generation::GridLayout;
use crate::turn::TurnEvent;

/// Step one box in `dir`. A locked target stops the player at the door.
pub fn step(
    world: &mut World,
    layout: &GridLayout,
    player: PlayerId,
    here: &GridBox,
    dir: Direction,
    tuning: &Tuning,
    rng: &mut impl Rng,
) -> Result<Vec<TurnEvent>, SessionError> {
    let illegal = SessionError::IllegalAction {
        action: ActionCode::Move(dir),
        at: here.id(),
    };
    let (x, y) = layout.grid.neighbor(here.x(), here.y(), dir).ok_or(illegal)?;
    let target = layout.grid.locate(x, y)?;
    let target_box = layout
        .grid_box(world, target)
        .ok_or(SessionError::UnknownBox(target))?;

    let mut events = Vec::new();
    if target_box.is_locked() {
        debug!("{} is locked", target);
        events.push(TurnEvent::Bumped { into: target });
        return Ok(events);
    }

    enter(world, layout, player, target, tuning, rng, &mut events)?;
    events.insert(
        0,
        TurnEvent::Moved {
            from: here.id(),
            to: target,
        },
    );
    Ok(events)
}

/// Flee through a random open side of the box, regardless of what waits there.
pub fn flee(
    world: &mut World,
    layout: &GridLayout,
    player: PlayerId,
    here: &GridBox,
    tuning: &Tuning,
    rng: &mut impl Rng,
) -> Result<Vec<TurnEvent>, SessionError> {
    let from = here.id();
    let exits = here.paths_from_grid_boundaries();
    let Some(dir) = exits.iter().choose(rng) else {
        return Ok(vec![TurnEvent::Fled { from, to: from }]);
    };
    let to = match layout.grid.neighbor(here.x(), here.y(), dir) {
        Some((x, y)) => layout.grid.locate(x, y)?,
        None => from,
    };

    let mut events = vec![TurnEvent::Fled { from, to }];
    if to != from {
        enter(world, layout, player, to, tuning, rng, &mut events)?;
    }
    Ok(events)
}

/// Put the player in `to`, reveal it and fire its effect.
fn enter(
    world: &mut World,
    layout: &GridLayout,
    player: PlayerId,
    to: BoxId,
    tuning: &Tuning,
    rng: &mut impl Rng,
    events: &mut Vec<TurnEvent>,
) -> Result<(), SessionError> {
    place_player(world, player, to)?;
    layout.reveal(world, to);
    effects::trigger(world, layout, player, to, tuning, rng, events)
}
