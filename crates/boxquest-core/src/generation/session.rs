//! Populated session generation

use log::info;
use rand::seq::SliceRandom;

use boxquest_logic::{EffectKind, Grid};

use super::names::{hostile_name, item_name};
use crate::config::SessionConfig;
use crate::engine::SessionEngine;
use crate::error::SessionError;

/// Build a session from `config`: the player on `start` (revealed), then
/// hostiles, items and effects on distinct random boxes away from the start,
/// and `locked_count` random boxes locked.
pub fn generate_session(config: &SessionConfig) -> Result<SessionEngine, SessionError> {
    let problems = config.validate();
    if !problems.is_empty() {
        return Err(SessionError::InvalidConfig(problems));
    }

    let grid = Grid::new(config.length, config.width)?;
    let mut engine = SessionEngine::new(grid, config.tuning, config.seed)?;

    let [sx, sy] = config.start;
    engine.spawn_player(sx, sy)?;

    let mut free: Vec<(u32, u32)> = grid.coords().filter(|&c| c != (sx, sy)).collect();
    free.shuffle(engine.rng());

    let mut cells = free.iter().copied();
    for (x, y) in cells.by_ref().take(config.npc_count as usize) {
        let name = hostile_name(engine.rng());
        engine.spawn_npc(name, x, y, config.npc_health)?;
    }
    for (x, y) in cells.by_ref().take(config.item_count as usize) {
        let name = item_name(engine.rng());
        engine.spawn_item(name, x, y)?;
    }
    for (i, (x, y)) in cells.take(config.effect_count as usize).enumerate() {
        let kind = EffectKind::ALL[i % EffectKind::ALL.len()];
        engine.spawn_effect(kind, x, y)?;
    }

    // Locks are independent of occupancy.
    free.shuffle(engine.rng());
    for &(x, y) in free.iter().take(config.locked_count as usize) {
        let id = grid.locate(x, y)?;
        engine.set_locked(id, true)?;
    }

    info!(
        "Generated {}×{} session: {} hostiles, {} items, {} effects, {} locked",
        grid.length(),
        grid.width(),
        config.npc_count,
        config.item_count,
        config.effect_count,
        config.locked_count.min(free.len() as u32),
    );

    Ok(engine)
}
