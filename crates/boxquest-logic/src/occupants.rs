//! Occupant records and the lookup seam the rule engine reads them through.
//!
//! Occupancy is a back-reference: every occupant carries the id of the box it
//! stands in. Boxes never own their occupants. The engine asks an
//! [`OccupantLookup`] on every query, so whatever store sits behind it
//! (the ECS world in the session layer, or the in-memory [`OccupantTable`])
//! is always read live.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::grid::BoxId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NpcId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EffectId(pub u32);

// ── Records ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    /// `None` means the player has not been placed on the grid.
    pub box_id: Option<BoxId>,
}

/// Health block shared by hostiles and the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    pub current_health: u32,
    pub max_health: u32,
}

impl Stat {
    pub fn new(health: u32) -> Self {
        Self {
            current_health: health,
            max_health: health,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.current_health > 0
    }

    /// Apply damage, never dropping below zero. Returns the damage dealt.
    pub fn wound(&mut self, amount: u32) -> u32 {
        let dealt = amount.min(self.current_health);
        self.current_health -= dealt;
        dealt
    }

    /// Restore health up to `max_health`. Returns the amount restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let restored = amount.min(self.max_health.saturating_sub(self.current_health));
        self.current_health += restored;
        restored
    }
}

/// A hostile occupant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Npc {
    pub id: NpcId,
    pub name: String,
    pub box_id: Option<BoxId>,
    pub stat: Stat,
}

impl Npc {
    pub fn is_alive(&self) -> bool {
        self.stat.is_alive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub box_id: Option<BoxId>,
    /// Set while a player carries the item.
    pub player: Option<PlayerId>,
    pub equipped: bool,
}

impl Item {
    /// Lying on the floor of `box_id`, not in anyone's pack.
    pub fn is_on_floor_of(&self, box_id: BoxId) -> bool {
        self.box_id == Some(box_id) && self.player.is_none()
    }

    pub fn is_carried_by(&self, player: PlayerId) -> bool {
        self.player == Some(player)
    }

    pub fn is_equipped_by(&self, player: PlayerId) -> bool {
        self.is_carried_by(player) && self.equipped
    }
}

/// Closed set of environmental effect types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    Heal,
    Hurt,
    Teleport,
}

impl EffectKind {
    pub const ALL: [EffectKind; 3] = [EffectKind::Heal, EffectKind::Hurt, EffectKind::Teleport];

    pub fn name(self) -> &'static str {
        match self {
            EffectKind::Heal => "heal",
            EffectKind::Hurt => "hurt",
            EffectKind::Teleport => "teleport",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effect {
    pub id: EffectId,
    pub kind: EffectKind,
    pub box_id: Option<BoxId>,
}

// ── Lookup seam ────────────────────────────────────────────────────────

/// Read-only occupancy queries, answered from current state on every call.
pub trait OccupantLookup {
    fn player(&self, id: PlayerId) -> Option<Player>;

    /// The hostile standing in `box_id`, alive or not.
    fn npc_at(&self, box_id: BoxId) -> Option<Npc>;

    fn effect_at(&self, box_id: BoxId) -> Option<Effect>;

    /// Every item whose box reference is `box_id`.
    fn items_at(&self, box_id: BoxId) -> Vec<Item>;

    fn item(&self, id: ItemId) -> Option<Item>;

    /// Box the player currently stands in, if placed.
    fn player_box(&self, id: PlayerId) -> Option<BoxId> {
        self.player(id).and_then(|p| p.box_id)
    }
}

/// Plain in-memory occupant store.
///
/// Keyed by id so iteration order is stable. Used by callers that already
/// hold occupant records as plain data (tests, tools, small front ends).
#[derive(Debug, Clone, Default)]
pub struct OccupantTable {
    players: BTreeMap<PlayerId, Player>,
    npcs: BTreeMap<NpcId, Npc>,
    items: BTreeMap<ItemId, Item>,
    effects: BTreeMap<EffectId, Effect>,
}

impl OccupantTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a player record.
    pub fn put_player(&mut self, player: Player) {
        self.players.insert(player.id, player);
    }

    pub fn put_npc(&mut self, npc: Npc) {
        self.npcs.insert(npc.id, npc);
    }

    pub fn put_item(&mut self, item: Item) {
        self.items.insert(item.id, item);
    }

    pub fn put_effect(&mut self, effect: Effect) {
        self.effects.insert(effect.id, effect);
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(&id)
    }

    pub fn npc_mut(&mut self, id: NpcId) -> Option<&mut Npc> {
        self.npcs.get_mut(&id)
    }

    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.get_mut(&id)
    }
}

impl OccupantLookup for OccupantTable {
    fn player(&self, id: PlayerId) -> Option<Player> {
        self.players.get(&id).cloned()
    }

    fn npc_at(&self, box_id: BoxId) -> Option<Npc> {
        self.npcs
            .values()
            .find(|n| n.box_id == Some(box_id))
            .cloned()
    }

    fn effect_at(&self, box_id: BoxId) -> Option<Effect> {
        self.effects
            .values()
            .find(|e| e.box_id == Some(box_id))
            .copied()
    }

    fn items_at(&self, box_id: BoxId) -> Vec<Item> {
        self.items
            .values()
            .filter(|i| i.box_id == Some(box_id))
            .cloned()
            .collect()
    }

    fn item(&self, id: ItemId) -> Option<Item> {
        self.items.get(&id).cloned()
    }
}
