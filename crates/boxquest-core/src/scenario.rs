//! Hand-written sessions loaded from JSON.
//!
//! A scenario fixes the layout (dimensions, start, occupants, locked and
//! explored boxes) and optionally a script of player steps to replay:
//!
//! ```json
//! {
//!   "name": "corridor",
//!   "length": 3, "width": 1,
//!   "items": [{ "name": "dagger", "at": [1, 1] }],
//!   "script": [{ "action": "t", "item": 1 }, { "equip": 1 }, { "action": "e" }]
//! }
//! ```
//!
//! Occupant ids follow declaration order, starting at 1.

use log::info;
use serde::{Deserialize, Serialize};

use boxquest_logic::{ActionCode, EffectKind, Grid, ItemId};

use crate::config::Tuning;
use crate::engine::SessionEngine;
use crate::error::SessionError;
use crate::turn::TurnReport;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: String,
    pub length: u32,
    pub width: u32,
    #[serde(default = "default_start")]
    pub start: [u32; 2],
    #[serde(default)]
    pub tuning: Tuning,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub hostiles: Vec<HostileSpec>,
    #[serde(default)]
    pub items: Vec<ItemSpec>,
    #[serde(default)]
    pub effects: Vec<EffectSpec>,
    #[serde(default)]
    pub locked: Vec<[u32; 2]>,
    #[serde(default)]
    pub explored: Vec<[u32; 2]>,
    #[serde(default)]
    pub script: Vec<ScriptStep>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostileSpec {
    pub name: String,
    pub at: [u32; 2],
    #[serde(default = "default_hostile_health")]
    pub health: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSpec {
    pub name: String,
    pub at: [u32; 2],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectSpec {
    pub kind: EffectKind,
    pub at: [u32; 2],
}

/// One scripted step: equip a carried item, or apply an action code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScriptStep {
    Equip {
        equip: u32,
    },
    Act {
        action: String,
        #[serde(default)]
        item: Option<u32>,
    },
}

fn default_start() -> [u32; 2] {
    [1, 1]
}

fn default_hostile_health() -> u32 {
    8
}

impl Scenario {
    pub fn from_json(json: &str) -> Result<Self, SessionError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Lay the scenario out in a fresh session.
    pub fn build(&self) -> Result<SessionEngine, SessionError> {
        let grid = Grid::new(self.length, self.width)?;
        let mut engine = SessionEngine::new(grid, self.tuning, self.seed)?;

        let [sx, sy] = self.start;
        engine.spawn_player(sx, sy)?;
        for h in &self.hostiles {
            engine.spawn_npc(&h.name, h.at[0], h.at[1], h.health)?;
        }
        for i in &self.items {
            engine.spawn_item(&i.name, i.at[0], i.at[1])?;
        }
        for e in &self.effects {
            engine.spawn_effect(e.kind, e.at[0], e.at[1])?;
        }
        for &[x, y] in &self.locked {
            let id = grid.locate(x, y)?;
            engine.set_locked(id, true)?;
        }
        for &[x, y] in &self.explored {
            let id = grid.locate(x, y)?;
            engine.reveal(id)?;
        }

        info!(
            "Built scenario {:?} ({}×{}, {} scripted steps)",
            self.name,
            self.length,
            self.width,
            self.script.len()
        );
        Ok(engine)
    }

    /// Replay the script against `engine`, stopping early if the player falls.
    /// Returns one report per applied action.
    pub fn play(&self, engine: &mut SessionEngine) -> Result<Vec<TurnReport>, SessionError> {
        let mut reports = Vec::new();
        for step in &self.script {
            if engine.is_over() {
                break;
            }
            match step {
                ScriptStep::Equip { equip } => engine.equip(ItemId(*equip))?,
                ScriptStep::Act { action, item } => {
                    let code: ActionCode = action.parse()?;
                    reports.push(engine.apply(code, item.map(ItemId))?);
                }
            }
        }
        Ok(reports)
    }
}
