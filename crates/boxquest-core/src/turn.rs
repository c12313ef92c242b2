//! What happened during one applied turn.

use boxquest_logic::{ActionCode, BoxId, EffectKind, ItemId, NpcId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnEvent {
    Moved { from: BoxId, to: BoxId },
    /// Tried to walk into a locked box and stayed put.
    Bumped { into: BoxId },
    /// Fled; `to == from` when there was nowhere to go.
    Fled { from: BoxId, to: BoxId },
    /// An effect fired and was consumed. `amount` is health gained or lost.
    EffectTriggered { kind: EffectKind, at: BoxId, amount: u32 },
    Teleported { to: BoxId },
    /// The player hit a hostile.
    Struck { npc: NpcId, damage: u32, remaining: u32 },
    Defeated { npc: NpcId },
    /// A hostile hit the player.
    Hit { by: NpcId, damage: u32, remaining: u32 },
    Took(ItemId),
    Dropped(ItemId),
    Used { item: ItemId, damage: u32 },
    /// The turn passed with no effect.
    Idle,
    PlayerDefeated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    pub turn: u64,
    pub action: ActionCode,
    pub events: Vec<TurnEvent>,
}

impl TurnReport {
    pub fn player_defeated(&self) -> bool {
        self.events.contains(&TurnEvent::PlayerDefeated)
    }
}
