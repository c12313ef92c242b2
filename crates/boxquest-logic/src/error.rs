//! Errors raised while constructing grids and boxes.
//!
//! The rule queries themselves are total; bad coordinates and empty grids are
//! rejected here, before any box exists.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    /// Both grid dimensions must be at least 1.
    #[error("grid dimensions must be positive, got {length}×{width}")]
    InvalidDimensions { length: u32, width: u32 },
    /// `length × width` boxes would not fit in a `u32` box id.
    #[error("a {length}×{width} grid has too many boxes")]
    TooLarge { length: u32, width: u32 },
    /// Coordinates fall outside `1..=length × 1..=width`.
    #[error("box ({x}, {y}) is outside a {length}×{width} grid")]
    OutOfBounds {
        x: u32,
        y: u32,
        length: u32,
        width: u32,
    },
}
