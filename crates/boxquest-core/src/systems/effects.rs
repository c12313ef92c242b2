//! Effect system - fires and consumes the effect in a box the player enters

use hecs::World;
use log::info;
use rand::seq::IteratorRandom;
use rand::Rng;

use boxquest_logic::{BoxId, EffectKind, PlayerId};

use super::{place_player, with_vitals};
use crate::config::Tuning;
use crate::error::SessionError;
use crate::generation::GridLayout;
use crate::lookup;
use crate::turn::TurnEvent;

/// Fire the effect at `at`, if any. A teleport lands without firing the
/// destination's effect.
pub fn trigger(
    world: &mut World,
    layout: &GridLayout,
    player: PlayerId,
    at: BoxId,
    tuning: &Tuning,
    rng: &mut impl Rng,
    events: &mut Vec<TurnEvent>,
) -> Result<(), SessionError> {
    let Some((entity, effect)) = lookup::effect_entity_at(world, at) else {
        return Ok(());
    };
    let _ = world.despawn(entity);

    let amount = match effect.kind {
        EffectKind::Heal => {
            with_vitals(world, player, |v| v.stat.heal(tuning.effect_strength)).unwrap_or(0)
        }
        EffectKind::Hurt => {
            with_vitals(world, player, |v| v.stat.wound(tuning.effect_strength)).unwrap_or(0)
        }
        EffectKind::Teleport => 0,
    };
    info!("{} effect fired at {} ({})", effect.kind.name(), at, amount);
    events.push(TurnEvent::EffectTriggered {
        kind: effect.kind,
        at,
        amount,
    });

    if effect.kind == EffectKind::Teleport {
        let to = layout.box_ids().choose(rng).unwrap_or(at);
        place_player(world, player, to)?;
        layout.reveal(world, to);
        info!("Player teleported to {}", to);
        events.push(TurnEvent::Teleported { to });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::fixture::{world_with_player, HERO};
    use boxquest_logic::{Effect, EffectId, OccupantLookup};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::components::Vitals;
    use crate::lookup::OccupantView;

    fn put_effect(world: &mut World, at: BoxId, kind: EffectKind) {
        world.spawn((Effect {
            id: EffectId(1),
            kind,
            box_id: Some(at),
        },));
    }

    fn health(world: &World) -> u32 {
        with_vitals(world, HERO, |v: &mut Vitals| v.stat.current_health).unwrap()
    }

    #[test]
    fn test_hurt_then_heal_caps_at_max() {
        let (mut world, layout) = world_with_player(3, 1, 1, 1);
        let tuning = Tuning::default();
        let mut rng = StdRng::seed_from_u64(1);
        let mut events = Vec::new();

        let a = layout.grid.box_id(2, 1).unwrap();
        put_effect(&mut world, a, EffectKind::Hurt);
        trigger(&mut world, &layout, HERO, a, &tuning, &mut rng, &mut events).unwrap();
        assert_eq!(health(&world), 20 - tuning.effect_strength);

        let b = layout.grid.box_id(3, 1).unwrap();
        put_effect(&mut world, b, EffectKind::Heal);
        put_effect(&mut world, a, EffectKind::Heal);
        trigger(&mut world, &layout, HERO, b, &tuning, &mut rng, &mut events).unwrap();
        trigger(&mut world, &layout, HERO, a, &tuning, &mut rng, &mut events).unwrap();
        assert_eq!(health(&world), 20);
        assert_eq!(events.len(), 3);
    }

    #[test]
    fn test_effect_is_consumed() {
        let (mut world, layout) = world_with_player(2, 1, 1, 1);
        let at = layout.grid.box_id(2, 1).unwrap();
        put_effect(&mut world, at, EffectKind::Hurt);
        let mut events = Vec::new();
        let mut rng = StdRng::seed_from_u64(1);
        trigger(&mut world, &layout, HERO, at, &Tuning::default(), &mut rng, &mut events).unwrap();
        assert!(OccupantView(&world).effect_at(at).is_none());

        events.clear();
        trigger(&mut world, &layout, HERO, at, &Tuning::default(), &mut rng, &mut events).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn test_teleport_reveals_landing_box() {
        let (mut world, layout) = world_with_player(4, 4, 1, 1);
        let at = layout.grid.box_id(2, 2).unwrap();
        put_effect(&mut world, at, EffectKind::Teleport);
        let mut events = Vec::new();
        let mut rng = StdRng::seed_from_u64(9);
        trigger(&mut world, &layout, HERO, at, &Tuning::default(), &mut rng, &mut events).unwrap();

        let Some(TurnEvent::Teleported { to }) = events.last().cloned() else {
            panic!("expected a teleport, got {events:?}");
        };
        assert_eq!(OccupantView(&world).player_box(HERO), Some(to));
        assert!(layout.grid_box(&world, to).unwrap().is_explored());
    }
}
