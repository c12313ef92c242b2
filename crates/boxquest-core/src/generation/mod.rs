//! Generation - creation of grids and populated sessions

mod grid;
mod names;
mod session;

pub use grid::*;
pub use names::*;
pub use session::*;
