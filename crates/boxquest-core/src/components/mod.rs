//! Component definitions for the session world.
//!
//! Boxes carry a `GridBox`; occupants carry the logic crate's records
//! (`Player`, `Npc`, `Item`, `Effect`) directly, so the location
//! back-reference lives in exactly one place.

mod common;

pub use common::*;
pub use boxquest_logic::{Effect, GridBox, Item, Npc, Player};
