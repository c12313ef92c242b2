//! Combat numbers attached alongside occupant records.

use boxquest_logic::Stat;
use serde::{Deserialize, Serialize};

/// Health and attack of the player entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vitals {
    pub stat: Stat,
    pub attack: u32,
}

impl Vitals {
    pub fn new(health: u32, attack: u32) -> Self {
        Self {
            stat: Stat::new(health),
            attack,
        }
    }
}

/// Damage a hostile deals per strike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Strike(pub u32);

/// Damage an item deals when used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Power(pub u32);
