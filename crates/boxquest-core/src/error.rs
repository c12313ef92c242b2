//! Errors returned by the session engine.

use boxquest_logic::{ActionCode, BoxId, GridError, ItemId, UnknownAction};
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("scenario parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid session config: {}", join(.0))]
    InvalidConfig(Vec<ConfigError>),

    #[error("{0} is not on this grid")]
    UnknownBox(BoxId),

    #[error("no item {0:?}")]
    UnknownItem(ItemId),

    #[error(transparent)]
    UnknownAction(#[from] UnknownAction),

    #[error("the player has not been placed on the grid")]
    PlayerNotPlaced,

    #[error("action {action} is not legal in {at}")]
    IllegalAction { action: ActionCode, at: BoxId },

    #[error("{at} already holds a {kind}")]
    Occupied { at: BoxId, kind: &'static str },

    #[error("{0:?} is not carried by the player")]
    NotCarried(ItemId),

    #[error("the player has been defeated")]
    PlayerDefeated,
}

fn join(problems: &[ConfigError]) -> String {
    problems
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
