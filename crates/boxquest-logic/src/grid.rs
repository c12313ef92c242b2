//! The rectangular coordinate space boxes live in.
//!
//! Coordinates are 1-based: `x` runs `1..=length` west to east, `y` runs
//! `1..=width` south to north. Box ids are derived from coordinates in
//! row-major order, so every box on a grid has a unique, stable id.
//!
//! ```
//! use boxquest_logic::grid::{BoxId, Grid};
//!
//! let grid = Grid::new(3, 3).unwrap();
//! assert_eq!(grid.box_id(1, 1), Some(BoxId(1)));
//! assert_eq!(grid.box_id(3, 3), Some(BoxId(9)));
//! assert_eq!(grid.coords_of(BoxId(5)), Some((2, 2)));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::direction::Direction;
use crate::error::GridError;

/// Identity of a box within its grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BoxId(pub u32);

impl fmt::Display for BoxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "box#{}", self.0)
    }
}

/// Immutable grid dimensions. Both are at least 1, and every box id fits in
/// a `u32`.
///
/// Only [`Grid::new`] builds one, so there is no `Deserialize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Grid {
    length: u32,
    width: u32,
}

impl Grid {
    pub fn new(length: u32, width: u32) -> Result<Self, GridError> {
        if length == 0 || width == 0 {
            return Err(GridError::InvalidDimensions { length, width });
        }
        if length.checked_mul(width).is_none() {
            return Err(GridError::TooLarge { length, width });
        }
        Ok(Self { length, width })
    }

    /// East–west extent.
    pub fn length(&self) -> u32 {
        self.length
    }

    /// North–south extent.
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn box_count(&self) -> usize {
        self.length as usize * self.width as usize
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        (1..=self.length).contains(&x) && (1..=self.width).contains(&y)
    }

    /// Reject coordinates outside the grid.
    pub fn check(&self, x: u32, y: u32) -> Result<(), GridError> {
        if self.contains(x, y) {
            Ok(())
        } else {
            Err(GridError::OutOfBounds {
                x,
                y,
                length: self.length,
                width: self.width,
            })
        }
    }

    /// Box id for `(x, y)`, or the bounds error.
    pub fn locate(&self, x: u32, y: u32) -> Result<BoxId, GridError> {
        self.check(x, y)?;
        Ok(BoxId((y - 1) * self.length + x))
    }

    pub fn box_id(&self, x: u32, y: u32) -> Option<BoxId> {
        if !self.contains(x, y) {
            return None;
        }
        Some(BoxId((y - 1) * self.length + x))
    }

    pub fn coords_of(&self, id: BoxId) -> Option<(u32, u32)> {
        if id.0 == 0 || id.0 as usize > self.box_count() {
            return None;
        }
        let index = id.0 - 1;
        Some((index % self.length + 1, index / self.length + 1))
    }

    /// All coordinates in box-id order (south row first, west to east).
    pub fn coords(&self) -> impl Iterator<Item = (u32, u32)> {
        let length = self.length;
        (1..=self.width).flat_map(move |y| (1..=length).map(move |x| (x, y)))
    }

    /// The neighboring coordinates one step in `dir`, if still on the grid.
    pub fn neighbor(&self, x: u32, y: u32, dir: Direction) -> Option<(u32, u32)> {
        let (dx, dy) = dir.offset();
        let nx = u32::try_from(x as i64 + dx).ok()?;
        let ny = u32::try_from(y as i64 + dy).ok()?;
        self.contains(nx, ny).then_some((nx, ny))
    }
}
