//! Pure box rules for BoxQuest.
//!
//! This crate contains the rule engine that decides what a single grid box
//! shows and allows. It is independent of any database, ECS, or runtime.
//! Functions take plain data and return plain values, so the session layer,
//! the headless harness, and any future front end share one implementation.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`direction`] | Cardinal directions and the canonical `nsew` direction set |
//! | [`error`] | Construction-time errors for grids and boxes |
//! | [`grid`] | Immutable rectangular coordinate space and box ids |
//! | [`grid_box`] | A single box: boundaries, occupancy, glyph, legal actions |
//! | [`occupants`] | Player / hostile / item / effect records and the lookup seam |
//! | [`policy`] | Action codes, combat actions, glyph precedence tables |

pub mod direction;
pub mod error;
pub mod grid;
pub mod grid_box;
pub mod occupants;
pub mod policy;

pub use direction::{Direction, DirectionSet};
pub use error::GridError;
pub use grid::{BoxId, Grid};
pub use grid_box::GridBox;
pub use occupants::{
    Effect, EffectId, EffectKind, Item, ItemId, Npc, NpcId, OccupantLookup, OccupantTable,
    Player, PlayerId, Stat,
};
pub use policy::{ActionCode, CombatAction, Glyph, UnknownAction, COMBAT_ACTIONS};
