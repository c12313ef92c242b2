//! Session configuration.
//!
//! `SessionConfig` drives procedural generation; `Tuning` holds the combat and
//! effect numbers shared by generated sessions and hand-written scenarios.
//! Both deserialize from JSON with every field optional.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Combat and effect numbers for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player_health: u32,
    pub player_attack: u32,
    /// Damage a hostile deals per strike.
    pub npc_attack: u32,
    /// Damage an equipped item deals when used.
    pub item_power: u32,
    /// Health restored by heal effects and removed by hurt effects.
    pub effect_strength: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_health: 20,
            player_attack: 4,
            npc_attack: 3,
            item_power: 6,
            effect_strength: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub length: u32,
    pub width: u32,
    /// Starting coordinates `[x, y]`.
    pub start: [u32; 2],
    pub npc_count: u32,
    pub npc_health: u32,
    pub item_count: u32,
    pub effect_count: u32,
    pub locked_count: u32,
    pub tuning: Tuning,
    /// Fixed seed for reproducible sessions; entropy when absent.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            length: 5,
            width: 5,
            start: [1, 1],
            npc_count: 3,
            npc_health: 8,
            item_count: 4,
            effect_count: 3,
            locked_count: 2,
            tuning: Tuning::default(),
            seed: None,
        }
    }
}

/// A problem found by [`SessionConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid must be at least 1×1, got {0}×{1}")]
    EmptyGrid(u32, u32),
    #[error("start ({0}, {1}) is outside the grid")]
    StartOutOfBounds(u32, u32),
    #[error("{requested} occupants do not fit in {available} boxes")]
    TooManyOccupants { requested: u32, available: u32 },
    #[error("player health must be positive")]
    ZeroPlayerHealth,
    #[error("hostiles would spawn dead")]
    ZeroNpcHealth,
}

impl SessionConfig {
    /// Occupants that each need a box of their own.
    pub fn occupant_count(&self) -> u32 {
        self.npc_count
            .saturating_add(self.item_count)
            .saturating_add(self.effect_count)
    }

    /// Validate the configuration, returning all errors found.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.length == 0 || self.width == 0 {
            errors.push(ConfigError::EmptyGrid(self.length, self.width));
        }
        let [sx, sy] = self.start;
        if !(1..=self.length).contains(&sx) || !(1..=self.width).contains(&sy) {
            errors.push(ConfigError::StartOutOfBounds(sx, sy));
        }

        // The start box stays clear.
        let available = self.length.saturating_mul(self.width).saturating_sub(1);
        if self.occupant_count() > available {
            errors.push(ConfigError::TooManyOccupants {
                requested: self.occupant_count(),
                available,
            });
        }

        if self.tuning.player_health == 0 {
            errors.push(ConfigError::ZeroPlayerHealth);
        }
        if self.npc_count > 0 && self.npc_health == 0 {
            errors.push(ConfigError::ZeroNpcHealth);
        }

        errors
    }
}
