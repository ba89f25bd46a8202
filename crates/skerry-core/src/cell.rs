//! Grid cell coordinates.

use std::fmt;

/// A cell coordinate on the world grid.
///
/// Components are `i32` so that neighbour arithmetic can go transiently
/// negative before the torus wraps it back into range. A `Cell` carries no
/// topology of its own; wrapping, adjacency, and distance live on
/// the torus type in `skerry-space`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    /// Column index (wraps at the grid width).
    pub x: i32,
    /// Row index (wraps at the grid height).
    pub y: i32,
}

impl Cell {
    /// Construct a cell from raw coordinates.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise offset, without wrapping.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}
