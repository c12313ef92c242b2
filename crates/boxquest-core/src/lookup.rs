//! Occupant lookups answered from the ECS world.
//!
//! Every call runs a fresh query, so the rule engine always sees what the
//! systems last wrote, even mid-turn.

use boxquest_logic::{
    BoxId, Effect, Item, ItemId, Npc, NpcId, OccupantLookup, Player, PlayerId,
};
use hecs::{Entity, World};

/// Read-only view of a session world for the rule engine.
#[derive(Clone, Copy)]
pub struct OccupantView<'w>(pub &'w World);

impl OccupantLookup for OccupantView<'_> {
    fn player(&self, id: PlayerId) -> Option<Player> {
        self.0
            .query::<&Player>()
            .iter()
            .find(|(_, p)| p.id == id)
            .map(|(_, p)| p.clone())
    }

    fn npc_at(&self, box_id: BoxId) -> Option<Npc> {
        self.0
            .query::<&Npc>()
            .iter()
            .find(|(_, n)| n.box_id == Some(box_id))
            .map(|(_, n)| n.clone())
    }

    fn effect_at(&self, box_id: BoxId) -> Option<Effect> {
        self.0
            .query::<&Effect>()
            .iter()
            .find(|(_, e)| e.box_id == Some(box_id))
            .map(|(_, e)| *e)
    }

    fn items_at(&self, box_id: BoxId) -> Vec<Item> {
        let mut items: Vec<Item> = self
            .0
            .query::<&Item>()
            .iter()
            .filter(|(_, i)| i.box_id == Some(box_id))
            .map(|(_, i)| i.clone())
            .collect();
        items.sort_by_key(|i| i.id);
        items
    }

    fn item(&self, id: ItemId) -> Option<Item> {
        self.0
            .query::<&Item>()
            .iter()
            .find(|(_, i)| i.id == id)
            .map(|(_, i)| i.clone())
    }
}

// ── Entity finders used by the systems ─────────────────────────────────

pub fn player_entity(world: &World, id: PlayerId) -> Option<Entity> {
    world
        .query::<&Player>()
        .iter()
        .find(|(_, p)| p.id == id)
        .map(|(e, _)| e)
}

pub fn npc_entity_at(world: &World, box_id: BoxId) -> Option<(Entity, NpcId)> {
    world
        .query::<&Npc>()
        .iter()
        .find(|(_, n)| n.box_id == Some(box_id))
        .map(|(e, n)| (e, n.id))
}

pub fn item_entity(world: &World, id: ItemId) -> Option<Entity> {
    world
        .query::<&Item>()
        .iter()
        .find(|(_, i)| i.id == id)
        .map(|(e, _)| e)
}

pub fn effect_entity_at(world: &World, box_id: BoxId) -> Option<(Entity, Effect)> {
    world
        .query::<&Effect>()
        .iter()
        .find(|(_, e)| e.box_id == Some(box_id))
        .map(|(entity, e)| (entity, *e))
}
