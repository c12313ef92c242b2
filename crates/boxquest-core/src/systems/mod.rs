//! Systems - turn resolution over the session world

pub mod combat;
pub mod effects;
pub mod inventory;
pub mod movement;

use hecs::World;

use boxquest_logic::{BoxId, Player, PlayerId};

use crate::components::Vitals;
use crate::error::SessionError;
use crate::lookup;

/// Run `f` on the player's vitals. `None` when the player has none.
pub(crate) fn with_vitals<R>(
    world: &World,
    player: PlayerId,
    f: impl FnOnce(&mut Vitals) -> R,
) -> Option<R> {
    let entity = lookup::player_entity(world, player)?;
    let mut vitals = world.get::<&mut Vitals>(entity).ok()?;
    Some(f(&mut *vitals))
}

pub(crate) fn place_player(world: &World, player: PlayerId, to: BoxId) -> Result<(), SessionError> {
    let entity = lookup::player_entity(world, player).ok_or(SessionError::PlayerNotPlaced)?;
    let mut p = world
        .get::<&mut Player>(entity)
        .map_err(|_| SessionError::PlayerNotPlaced)?;
    p.box_id = Some(to);
    Ok(())
}

#[cfg(test)]
pub(crate) mod fixture {
    use boxquest_logic::{Grid, Npc, NpcId, Player, PlayerId, Stat};
    use hecs::World;

    use crate::components::{Strike, Vitals};
    use crate::generation::{generate_grid, GridLayout};

    pub const HERO: PlayerId = PlayerId(1);

    /// An unexplored `length × width` world with the player at `(x, y)`.
    pub fn world_with_player(length: u32, width: u32, x: u32, y: u32) -> (World, GridLayout) {
        let mut world = World::new();
        let grid = Grid::new(length, width).unwrap();
        let layout = generate_grid(&mut world, grid).unwrap();
        world.spawn((
            Player {
                id: HERO,
                box_id: grid.box_id(x, y),
            },
            Vitals::new(20, 4),
        ));
        (world, layout)
    }

    pub fn spawn_hostile(world: &mut World, layout: &GridLayout, x: u32, y: u32, health: u32) {
        world.spawn((
            Npc {
                id: NpcId(1),
                name: "goblin".into(),
                box_id: layout.grid.box_id(x, y),
                stat: Stat::new(health),
            },
            Strike(3),
        ));
    }
}
