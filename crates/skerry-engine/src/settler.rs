//! Settlers: islanders who wander their home landmass.

use crate::agent::AgentContext;
use crate::config::{LAND_LAYER, PEOPLE_LAYER};
use rand::seq::SliceRandom;
use skerry_core::{Cell, EntityId};
use skerry_space::{Adjacency, GridError};

/// A person taking one random step across adjacent land per tick.
#[derive(Clone, Debug)]
pub struct Settler {
    /// Registry id of the settler entity.
    pub id: EntityId,
    /// Display name (opaque string from the naming collaborator).
    pub name: String,
    position: Cell,
}

impl Settler {
    /// Create a settler standing at `position`.
    pub fn new(id: EntityId, name: impl Into<String>, position: Cell) -> Self {
        Self {
            id,
            name: name.into(),
            position,
        }
    }

    /// Current grid position.
    pub fn position(&self) -> Cell {
        self.position
    }

    /// Step to a uniformly chosen adjacent land cell.
    ///
    /// With no adjacent land (a one-cell islet), the move is skipped for
    /// this tick rather than treated as an error.
    pub fn step(&mut self, ctx: &mut AgentContext<'_>) -> Result<(), GridError> {
        let candidates: Vec<Cell> = ctx
            .grid
            .torus()
            .neighbourhood(self.position, Adjacency::Moore)
            .into_iter()
            .filter(|&cell| ctx.grid.occupied(LAND_LAYER, cell).unwrap_or(false))
            .collect();
        let Some(&target) = candidates.choose(ctx.rng) else {
            return Ok(());
        };
        ctx.grid
            .relocate(self.id, PEOPLE_LAYER, self.position, target)?;
        self.position = target;
        Ok(())
    }
}
