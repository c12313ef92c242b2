//! BoxQuest Core - session engine for the box rule engine
//!
//! Holds one game session: the grid's boxes and everything standing in them,
//! stored in a `hecs` world. The pure rules in `boxquest_logic` read that
//! world through [`lookup::OccupantView`]; the systems here mutate it when a
//! turn is applied.
//!
//! # Architecture
//!
//! - **Entities**: boxes, the player, hostiles, items, effects
//! - **Components**: `GridBox` on boxes, the logic crate's occupant records on
//!   occupants, plus combat numbers ([`components::Vitals`], [`components::Strike`],
//!   [`components::Power`])
//! - **Systems**: turn resolution (movement, combat, inventory, effects)
//!
//! # Example
//!
//! ```rust,no_run
//! use boxquest_core::prelude::*;
//!
//! let config = SessionConfig::default();
//! let mut engine = generate_session(&config).unwrap();
//!
//! for row in engine.render_map() {
//!     println!("{}", row);
//! }
//! let report = engine.apply(ActionCode::Run, None).unwrap();
//! println!("{:?}", report.events);
//! ```

pub mod components;
pub mod config;
pub mod engine;
pub mod error;
pub mod generation;
pub mod lookup;
pub mod scenario;
pub mod systems;
pub mod turn;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::config::{SessionConfig, Tuning};
    pub use crate::engine::SessionEngine;
    pub use crate::error::SessionError;
    pub use crate::generation::generate_session;
    pub use crate::scenario::Scenario;
    pub use crate::turn::{TurnEvent, TurnReport};
    pub use boxquest_logic::{ActionCode, BoxId, Glyph, Grid, GridBox, ItemId, PlayerId};
}
