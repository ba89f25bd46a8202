//! The land mask: a read-only derivation of the grid's Land layer.

use crate::error::GridError;
use crate::grid::LayeredGrid;
use crate::torus::Torus;
use skerry_core::Cell;

/// Which cells are land.
///
/// Materialised once after the land-generation collaborator has populated
/// the Land layer; the weather engine and the sea-lane router consume it
/// without ever touching the grid itself. A cell is land iff its Land-layer
/// slot was occupied at capture time.
#[derive(Clone, Debug)]
pub struct LandMask {
    torus: Torus,
    land: Vec<bool>,
}

impl LandMask {
    /// Capture the mask from the named `Single` land layer of `grid`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidLayer`] if `layer` is not in the grid's
    /// schema.
    pub fn capture(grid: &LayeredGrid, layer: &str) -> Result<Self, GridError> {
        let torus = *grid.torus();
        let mut land = Vec::with_capacity(torus.cell_count());
        for cell in torus.cells() {
            land.push(grid.occupied(layer, cell)?);
        }
        Ok(Self { torus, land })
    }

    /// The topology the mask was captured over.
    pub fn torus(&self) -> &Torus {
        &self.torus
    }

    /// Whether `cell` is land.
    pub fn is_land(&self, cell: Cell) -> bool {
        self.land[self.torus.index_of(cell)]
    }

    /// Number of land cells.
    pub fn land_cell_count(&self) -> usize {
        self.land.iter().filter(|&&l| l).count()
    }

    /// Iterate all land cells in canonical order.
    pub fn land_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.torus
            .cells()
            .filter(move |&cell| self.land[self.torus.index_of(cell)])
    }

    /// Iterate all water (non-land) cells in canonical order.
    pub fn water_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.torus
            .cells()
            .filter(move |&cell| !self.land[self.torus.index_of(cell)])
    }
}
