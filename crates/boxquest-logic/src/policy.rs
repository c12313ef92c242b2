//! Decision tables: action codes, combat actions, and glyph precedence.
//!
//! The box gathers facts about itself ([`BoxFacts`]) and hands them here.
//! Keeping the tables as constants makes precedence order auditable in one
//! place and testable without any grid or occupant store.
//!
//! # Glyph precedence
//!
//! | Order | Condition | Glyph |
//! |-------|-----------|-------|
//! | 1 | Player stands in the box | `@` |
//! | 2 | Box unexplored | `?` |
//! | 3 | Locked | `L` |
//! | 4 | Effect present | `+` heal, `-` hurt, `%` teleport |
//! | 5 | Live hostile present | `E` |
//! | 6 | At least one item | `I` |
//! | 7 | Otherwise | `X` |
//!
//! Rules 3–7 only apply once the box is explored.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::direction::{Direction, DirectionSet};
use crate::occupants::EffectKind;

// ── Actions ────────────────────────────────────────────────────────────

/// Combat commands offered while a live hostile shares the box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CombatAction {
    Attack,
    Block,
}

impl CombatAction {
    pub fn code(self) -> &'static str {
        match self {
            CombatAction::Attack => "a",
            CombatAction::Block => "b",
        }
    }
}

/// The fixed, closed set of combat actions.
pub const COMBAT_ACTIONS: [CombatAction; 2] = [CombatAction::Attack, CombatAction::Block];

/// One legal player action for the current turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ActionCode {
    /// Flee. Always legal.
    Run,
    Combat(CombatAction),
    Move(Direction),
    /// Pick up a floor item.
    Take,
    /// Put down a carried item.
    Drop,
    /// Use the equipped item.
    Use,
}

impl ActionCode {
    pub fn code(self) -> &'static str {
        match self {
            ActionCode::Run => "run",
            ActionCode::Combat(c) => c.code(),
            ActionCode::Move(Direction::North) => "n",
            ActionCode::Move(Direction::South) => "s",
            ActionCode::Move(Direction::East) => "e",
            ActionCode::Move(Direction::West) => "w",
            ActionCode::Take => "t",
            ActionCode::Drop => "d",
            ActionCode::Use => "i",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "run" => Some(ActionCode::Run),
            "t" => Some(ActionCode::Take),
            "d" => Some(ActionCode::Drop),
            "i" => Some(ActionCode::Use),
            _ => {
                if let Some(c) = COMBAT_ACTIONS.iter().find(|c| c.code() == value) {
                    return Some(ActionCode::Combat(*c));
                }
                let mut chars = value.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => Direction::from_code(ch).map(ActionCode::Move),
                    _ => None,
                }
            }
        }
    }
}

impl fmt::Display for ActionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl From<CombatAction> for ActionCode {
    fn from(action: CombatAction) -> Self {
        ActionCode::Combat(action)
    }
}

impl From<Direction> for ActionCode {
    fn from(dir: Direction) -> Self {
        ActionCode::Move(dir)
    }
}

/// Returned by `ActionCode::from_str` for unknown tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown action code {0:?}")]
pub struct UnknownAction(pub String);

impl FromStr for ActionCode {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionCode::parse(s).ok_or_else(|| UnknownAction(s.to_string()))
    }
}

/// What the action resolver needs to know about a box and the acting player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionFacts {
    /// Directions that stay on the grid.
    pub boundary: DirectionSet,
    pub live_hostile: bool,
    /// The item of interest lies on this box's floor.
    pub item_on_floor: bool,
    /// The item of interest is in the acting player's pack.
    pub item_carried: bool,
    /// Carried and equipped.
    pub item_equipped: bool,
}

/// Build the set of legal actions. Every rule is evaluated independently;
/// a live hostile adds the combat actions and removes all movement.
pub fn resolve_actions(facts: &ActionFacts) -> BTreeSet<ActionCode> {
    let mut actions = BTreeSet::new();
    actions.insert(ActionCode::Run);

    if facts.live_hostile {
        actions.extend(COMBAT_ACTIONS.iter().map(|c| ActionCode::Combat(*c)));
    } else {
        actions.extend(facts.boundary.iter().map(ActionCode::Move));
    }

    if facts.item_on_floor {
        actions.insert(ActionCode::Take);
    }
    if facts.item_carried {
        actions.insert(ActionCode::Drop);
    }
    if facts.item_carried && facts.item_equipped {
        actions.insert(ActionCode::Use);
    }

    actions
}

// ── Glyphs ─────────────────────────────────────────────────────────────

/// What a box shows to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Glyph {
    Player,
    Unexplored,
    Locked,
    Effect(EffectKind),
    Enemy,
    Item,
    Empty,
}

impl Glyph {
    pub fn as_str(self) -> &'static str {
        match self {
            Glyph::Player => "@",
            Glyph::Unexplored => "?",
            Glyph::Locked => "L",
            Glyph::Effect(EffectKind::Heal) => "+",
            Glyph::Effect(EffectKind::Hurt) => "-",
            Glyph::Effect(EffectKind::Teleport) => "%",
            Glyph::Enemy => "E",
            Glyph::Item => "I",
            Glyph::Empty => "X",
        }
    }

    pub fn as_char(self) -> char {
        // Every glyph string is one ASCII character.
        self.as_str().as_bytes()[0] as char
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved facts the glyph table is evaluated against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoxFacts {
    pub player_here: bool,
    pub explored: bool,
    pub locked: bool,
    pub effect: Option<EffectKind>,
    pub live_hostile: bool,
    pub has_items: bool,
}

/// One row of the precedence table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphRule {
    PlayerPresent,
    Unexplored,
    Locked,
    EffectPresent,
    LiveHostile,
    ItemsPresent,
    ExploredEmpty,
}

/// First matching rule wins.
pub const GLYPH_PRECEDENCE: [GlyphRule; 7] = [
    GlyphRule::PlayerPresent,
    GlyphRule::Unexplored,
    GlyphRule::Locked,
    GlyphRule::EffectPresent,
    GlyphRule::LiveHostile,
    GlyphRule::ItemsPresent,
    GlyphRule::ExploredEmpty,
];

impl GlyphRule {
    /// The glyph this rule produces for `facts`, or `None` if it does not apply.
    pub fn apply(self, facts: &BoxFacts) -> Option<Glyph> {
        match self {
            GlyphRule::PlayerPresent => facts.player_here.then_some(Glyph::Player),
            GlyphRule::Unexplored => (!facts.explored).then_some(Glyph::Unexplored),
            GlyphRule::Locked => (facts.explored && facts.locked).then_some(Glyph::Locked),
            GlyphRule::EffectPresent => facts.effect.filter(|_| facts.explored).map(Glyph::Effect),
            GlyphRule::LiveHostile => (facts.explored && facts.live_hostile).then_some(Glyph::Enemy),
            GlyphRule::ItemsPresent => (facts.explored && facts.has_items).then_some(Glyph::Item),
            GlyphRule::ExploredEmpty => facts.explored.then_some(Glyph::Empty),
        }
    }
}

pub fn resolve_glyph(facts: &BoxFacts) -> Glyph {
    GLYPH_PRECEDENCE
        .iter()
        .find_map(|rule| rule.apply(facts))
        // Unexplored and ExploredEmpty together cover every case.
        .unwrap_or(Glyph::Unexplored)
}
