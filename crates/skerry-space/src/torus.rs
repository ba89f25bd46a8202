//! Toroidal 2D topology: wrapping, adjacency, and wrap-aware distance.

use crate::error::SpaceError;
use skerry_core::Cell;
use smallvec::SmallVec;

/// The four cardinal offsets: E, W, S, N.
const OFFSETS_4: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// All 8 offsets: cardinals first, then diagonals.
const OFFSETS_8: [(i32, i32); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Which cells count as adjacent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Adjacency {
    /// The 4 cardinal neighbours (von Neumann neighbourhood).
    Orthogonal,
    /// Cardinals plus diagonals (Moore neighbourhood).
    Moore,
}

impl Adjacency {
    fn offsets(self) -> &'static [(i32, i32)] {
        match self {
            Self::Orthogonal => &OFFSETS_4,
            Self::Moore => &OFFSETS_8,
        }
    }
}

/// A 2D toroidal topology of `width * height` cells.
///
/// Both axes wrap: movement and distance never fall off an edge. Cell
/// `(width - 1, y)` has `(0, y)` as its east neighbour, and distance is
/// measured along the shorter of the direct and wrapped separations on
/// each axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Torus {
    width: u32,
    height: u32,
}

impl Torus {
    /// Maximum axis length: coordinates use `i32`, so each axis must fit.
    pub const MAX_DIM: u32 = i32::MAX as u32;

    /// Create a torus with the given dimensions.
    ///
    /// Returns `Err(SpaceError::EmptySpace)` if either axis is 0, or
    /// `Err(SpaceError::DimensionTooLarge)` if either exceeds `i32::MAX`.
    pub fn new(width: u32, height: u32) -> Result<Self, SpaceError> {
        if width == 0 || height == 0 {
            return Err(SpaceError::EmptySpace);
        }
        if width > Self::MAX_DIM {
            return Err(SpaceError::DimensionTooLarge {
                name: "width",
                value: width,
                max: Self::MAX_DIM,
            });
        }
        if height > Self::MAX_DIM {
            return Err(SpaceError::DimensionTooLarge {
                name: "height",
                value: height,
                max: Self::MAX_DIM,
            });
        }
        Ok(Self { width, height })
    }

    /// Width in cells.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in cells.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Wrap a single axis value into `[0, len)`.
    fn wrap_axis(val: i32, len: u32) -> i32 {
        let n = len as i32;
        ((val % n) + n) % n
    }

    /// Wrap a cell into the torus on both axes.
    pub fn wrap(&self, cell: Cell) -> Cell {
        Cell {
            x: Self::wrap_axis(cell.x, self.width),
            y: Self::wrap_axis(cell.y, self.height),
        }
    }

    /// The adjacent cells of `cell`, wrapped at both axes.
    ///
    /// Every cell has exactly 4 or 8 neighbours; on a degenerate torus
    /// (axis length 1 or 2) some of them may coincide.
    pub fn neighbourhood(&self, cell: Cell, adjacency: Adjacency) -> SmallVec<[Cell; 8]> {
        adjacency
            .offsets()
            .iter()
            .map(|&(dx, dy)| self.wrap(cell.offset(dx, dy)))
            .collect()
    }

    /// Separation along one axis: the shorter of direct and wrapped.
    fn axis_separation(a: i32, b: i32, len: u32) -> u32 {
        let diff = (a - b).unsigned_abs();
        diff.min(len - diff)
    }

    /// Euclidean distance accounting for wraparound.
    ///
    /// Each axis contributes the shorter of its direct and wrapped
    /// separations; the result is the hypotenuse of the two.
    pub fn distance(&self, a: Cell, b: Cell) -> f64 {
        let a = self.wrap(a);
        let b = self.wrap(b);
        let dx = Self::axis_separation(a.x, b.x, self.width) as f64;
        let dy = Self::axis_separation(a.y, b.y, self.height) as f64;
        (dx * dx + dy * dy).sqrt()
    }

    /// Row-major canonical rank of an in-range cell.
    ///
    /// The cell is wrapped first, so any coordinate is accepted.
    pub fn index_of(&self, cell: Cell) -> usize {
        let cell = self.wrap(cell);
        (cell.y as usize) * (self.width as usize) + (cell.x as usize)
    }

    /// Inverse of [`index_of`](Self::index_of).
    ///
    /// # Panics
    ///
    /// Panics if `index >= cell_count()`.
    pub fn cell_at(&self, index: usize) -> Cell {
        assert!(index < self.cell_count(), "cell index {index} out of range");
        Cell {
            x: (index % self.width as usize) as i32,
            y: (index / self.width as usize) as i32,
        }
    }

    /// Iterate all cells in row-major canonical order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.cell_count()).map(|i| self.cell_at(i))
    }

    /// Map a cell onto `[-1, 1]` per axis.
    ///
    /// Axis length 1 maps to 0.0. Used by the weather engine's parametric
    /// flow field.
    pub fn normalised(&self, cell: Cell) -> (f64, f64) {
        let cell = self.wrap(cell);
        let norm = |v: i32, len: u32| {
            if len <= 1 {
                0.0
            } else {
                -1.0 + 2.0 * (v as f64) / ((len - 1) as f64)
            }
        };
        (norm(cell.x, self.width), norm(cell.y, self.height))
    }
}
