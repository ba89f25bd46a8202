//! The layered grid: per-cell occupancy slots, one per declared layer.

use crate::error::GridError;
use crate::schema::LayerSchema;
use crate::torus::{Adjacency, Torus};
use indexmap::IndexSet;
use skerry_core::{Cell, EntityId, LayerKind};

/// One layer's occupancy slot within one cell.
#[derive(Clone, Debug)]
enum Slot {
    /// Holds at most one entity.
    Single(Option<EntityId>),
    /// Holds a duplicate-free set; iteration is insertion order.
    Multi(IndexSet<EntityId>),
}

impl Slot {
    fn empty_for(kind: LayerKind) -> Self {
        match kind {
            LayerKind::Single => Self::Single(None),
            LayerKind::Multi => Self::Multi(IndexSet::new()),
        }
    }

    fn iter(&self) -> SlotIter<'_> {
        match self {
            Self::Single(occupant) => SlotIter::Single(occupant.iter()),
            Self::Multi(set) => SlotIter::Multi(set.iter()),
        }
    }
}

enum SlotIter<'a> {
    Single(std::option::Iter<'a, EntityId>),
    Multi(indexmap::set::Iter<'a, EntityId>),
}

impl Iterator for SlotIter<'_> {
    type Item = EntityId;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Single(iter) => iter.next().copied(),
            Self::Multi(iter) => iter.next().copied(),
        }
    }
}

/// A toroidal grid where every cell holds one slot per declared layer.
///
/// All mutation funnels through [`place`](Self::place),
/// [`remove`](Self::remove), and [`relocate`](Self::relocate); effects are
/// local to the affected cells and the occupancy rules are the only global
/// invariant. Positions passed in are wrapped onto the torus first, so any
/// coordinate is accepted.
#[derive(Clone, Debug)]
pub struct LayeredGrid {
    torus: Torus,
    schema: LayerSchema,
    /// `cells[cell_rank][layer_position]`, row-major cell order.
    cells: Vec<Vec<Slot>>,
}

impl LayeredGrid {
    /// Create an empty grid over `torus` with the given layer schema.
    pub fn new(torus: Torus, schema: LayerSchema) -> Self {
        let template: Vec<Slot> = schema
            .iter()
            .map(|(_, kind)| Slot::empty_for(kind))
            .collect();
        let cells = vec![template; torus.cell_count()];
        Self {
            torus,
            schema,
            cells,
        }
    }

    /// The underlying topology.
    pub fn torus(&self) -> &Torus {
        &self.torus
    }

    /// The layer schema the grid was built with.
    pub fn schema(&self) -> &LayerSchema {
        &self.schema
    }

    fn layer_position(&self, layer: &str) -> Result<usize, GridError> {
        self.schema
            .position_of(layer)
            .ok_or_else(|| GridError::InvalidLayer {
                layer: layer.to_string(),
            })
    }

    /// Put `entity` into the `layer` slot at `cell`.
    ///
    /// # Errors
    ///
    /// - [`GridError::InvalidLayer`] if `layer` is not in the schema.
    /// - [`GridError::OccupiedSlot`] if the layer is `Single` and the slot
    ///   is already filled.
    ///
    /// Inserting an entity already present in a `Multi` slot is a no-op.
    pub fn place(&mut self, entity: EntityId, layer: &str, cell: Cell) -> Result<(), GridError> {
        let position = self.layer_position(layer)?;
        let cell = self.torus.wrap(cell);
        let rank = self.torus.index_of(cell);
        match &mut self.cells[rank][position] {
            Slot::Single(slot) => {
                if slot.is_some() {
                    return Err(GridError::OccupiedSlot {
                        layer: layer.to_string(),
                        cell,
                    });
                }
                *slot = Some(entity);
            }
            Slot::Multi(set) => {
                set.insert(entity);
            }
        }
        Ok(())
    }

    /// Take `entity` out of the `layer` slot at `cell`.
    ///
    /// # Errors
    ///
    /// - [`GridError::InvalidLayer`] if `layer` is not in the schema.
    /// - [`GridError::NotPresent`] if the entity is not in the slot. For a
    ///   `Single` layer this includes the slot holding a *different*
    ///   entity; removal is not allowed to evict a stranger.
    pub fn remove(&mut self, entity: EntityId, layer: &str, cell: Cell) -> Result<(), GridError> {
        let position = self.layer_position(layer)?;
        let cell = self.torus.wrap(cell);
        let rank = self.torus.index_of(cell);
        match &mut self.cells[rank][position] {
            Slot::Single(slot) => {
                if *slot != Some(entity) {
                    return Err(GridError::NotPresent {
                        layer: layer.to_string(),
                        cell,
                    });
                }
                *slot = None;
            }
            Slot::Multi(set) => {
                // shift_remove keeps insertion order for the survivors.
                if !set.shift_remove(&entity) {
                    return Err(GridError::NotPresent {
                        layer: layer.to_string(),
                        cell,
                    });
                }
            }
        }
        Ok(())
    }

    /// Move `entity` from `from` to `to` within its layer.
    ///
    /// Implemented as remove-then-place. If the place half fails (the
    /// target `Single` slot is occupied), the entity is restored to `from`
    /// before the error is returned, so a failed relocate never leaves the
    /// entity detached. The restore cannot itself fail: the source slot
    /// was vacated by the remove half.
    pub fn relocate(
        &mut self,
        entity: EntityId,
        layer: &str,
        from: Cell,
        to: Cell,
    ) -> Result<(), GridError> {
        self.remove(entity, layer, from)?;
        if let Err(err) = self.place(entity, layer, to) {
            let restored = self.place(entity, layer, from);
            debug_assert!(restored.is_ok(), "rollback into vacated slot failed");
            return Err(err);
        }
        Ok(())
    }

    /// The adjacent positions of `cell`, wrapped at both axes.
    ///
    /// Delegates to the torus; provided here so grid callers need not
    /// reach through [`torus()`](Self::torus) for the common case.
    pub fn neighbourhood(&self, cell: Cell, adjacency: Adjacency) -> smallvec::SmallVec<[Cell; 8]> {
        self.torus.neighbourhood(cell, adjacency)
    }

    /// Toroidal distance between two cells (see [`Torus::distance`]).
    pub fn distance(&self, a: Cell, b: Cell) -> f64 {
        self.torus.distance(a, b)
    }

    /// Whether any entity occupies the `layer` slot at `cell`.
    pub fn occupied(&self, layer: &str, cell: Cell) -> Result<bool, GridError> {
        let position = self.layer_position(layer)?;
        let rank = self.torus.index_of(cell);
        Ok(match &self.cells[rank][position] {
            Slot::Single(slot) => slot.is_some(),
            Slot::Multi(set) => !set.is_empty(),
        })
    }

    /// The occupant of a `Single` slot, if any.
    ///
    /// Returns the first inserted member for a `Multi` layer.
    pub fn occupant(&self, layer: &str, cell: Cell) -> Result<Option<EntityId>, GridError> {
        let position = self.layer_position(layer)?;
        let rank = self.torus.index_of(cell);
        Ok(self.cells[rank][position].iter().next())
    }

    /// Every entity in `cell`, layer-declaration order, insertion order
    /// within `Multi` layers.
    pub fn cell_contents(&self, cell: Cell) -> impl Iterator<Item = EntityId> + '_ {
        let rank = self.torus.index_of(cell);
        self.cells[rank].iter().flat_map(|slot| slot.iter())
    }

    /// Lazily yield every entity in the neighbourhood of `cell`.
    ///
    /// Positions are visited in adjacency-offset order, the centre cell
    /// last when requested; within each position, layer-declaration order
    /// then insertion order.
    pub fn neighbour_contents(
        &self,
        cell: Cell,
        adjacency: Adjacency,
        include_centre: bool,
    ) -> impl Iterator<Item = EntityId> + '_ {
        let mut positions = self.torus.neighbourhood(cell, adjacency);
        if include_centre {
            positions.push(self.torus.wrap(cell));
        }
        positions
            .into_iter()
            .flat_map(move |position| self.cell_contents(position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn c(x: i32, y: i32) -> Cell {
        Cell::new(x, y)
    }

    fn test_grid() -> LayeredGrid {
        let torus = Torus::new(6, 6).unwrap();
        let schema = LayerSchema::new()
            .with_layer("Land", LayerKind::Single)
            .with_layer("Ships", LayerKind::Multi);
        LayeredGrid::new(torus, schema)
    }

    // ── Placement rules ─────────────────────────────────────────

    #[test]
    fn single_layer_rejects_second_occupant() {
        let mut grid = test_grid();
        grid.place(EntityId(1), "Land", c(2, 2)).unwrap();
        let err = grid.place(EntityId(2), "Land", c(2, 2)).unwrap_err();
        assert!(matches!(err, GridError::OccupiedSlot { .. }));
    }

    #[test]
    fn unknown_layer_is_rejected() {
        let mut grid = test_grid();
        let err = grid.place(EntityId(1), "Clouds", c(0, 0)).unwrap_err();
        assert!(matches!(err, GridError::InvalidLayer { .. }));
    }

    #[test]
    fn multi_layer_reinsert_is_a_noop() {
        let mut grid = test_grid();
        grid.place(EntityId(7), "Ships", c(1, 1)).unwrap();
        grid.place(EntityId(7), "Ships", c(1, 1)).unwrap();
        assert_eq!(grid.cell_contents(c(1, 1)).count(), 1);
    }

    #[test]
    fn place_wraps_out_of_range_positions() {
        let mut grid = test_grid();
        grid.place(EntityId(1), "Land", c(-1, 8)).unwrap();
        assert!(grid.occupied("Land", c(5, 2)).unwrap());
    }

    // ── Removal rules ───────────────────────────────────────────

    #[test]
    fn removing_absent_multi_member_fails() {
        let mut grid = test_grid();
        grid.place(EntityId(1), "Ships", c(0, 0)).unwrap();
        let err = grid.remove(EntityId(2), "Ships", c(0, 0)).unwrap_err();
        assert!(matches!(err, GridError::NotPresent { .. }));
    }

    #[test]
    fn removing_a_stranger_from_single_slot_fails() {
        let mut grid = test_grid();
        grid.place(EntityId(1), "Land", c(0, 0)).unwrap();
        let err = grid.remove(EntityId(2), "Land", c(0, 0)).unwrap_err();
        assert!(matches!(err, GridError::NotPresent { .. }));
        assert!(grid.occupied("Land", c(0, 0)).unwrap());
    }

    // ── Relocation ──────────────────────────────────────────────

    #[test]
    fn relocate_round_trip_restores_occupancy() {
        let mut grid = test_grid();
        grid.place(EntityId(1), "Ships", c(1, 1)).unwrap();
        grid.place(EntityId(2), "Ships", c(1, 1)).unwrap();
        grid.relocate(EntityId(1), "Ships", c(1, 1), c(2, 2)).unwrap();
        grid.relocate(EntityId(1), "Ships", c(2, 2), c(1, 1)).unwrap();
        let contents: Vec<EntityId> = grid.cell_contents(c(1, 1)).collect();
        assert_eq!(contents, vec![EntityId(2), EntityId(1)]);
        assert_eq!(grid.cell_contents(c(2, 2)).count(), 0);
    }

    #[test]
    fn failed_relocate_rolls_back() {
        let mut grid = test_grid();
        grid.place(EntityId(1), "Land", c(0, 0)).unwrap();
        grid.place(EntityId(2), "Land", c(1, 0)).unwrap();
        let err = grid.relocate(EntityId(1), "Land", c(0, 0), c(1, 0)).unwrap_err();
        assert!(matches!(err, GridError::OccupiedSlot { .. }));
        assert_eq!(grid.occupant("Land", c(0, 0)).unwrap(), Some(EntityId(1)));
        assert_eq!(grid.occupant("Land", c(1, 0)).unwrap(), Some(EntityId(2)));
    }

    // ── Content enumeration ─────────────────────────────────────

    #[test]
    fn contents_follow_declaration_then_insertion_order() {
        let mut grid = test_grid();
        grid.place(EntityId(30), "Ships", c(3, 3)).unwrap();
        grid.place(EntityId(10), "Land", c(3, 3)).unwrap();
        grid.place(EntityId(20), "Ships", c(3, 3)).unwrap();
        let contents: Vec<EntityId> = grid.cell_contents(c(3, 3)).collect();
        assert_eq!(contents, vec![EntityId(10), EntityId(30), EntityId(20)]);
    }

    #[test]
    fn neighbour_contents_cover_wrapped_cells() {
        let mut grid = test_grid();
        grid.place(EntityId(1), "Land", c(5, 0)).unwrap(); // west of (0,0), wrapped
        grid.place(EntityId(2), "Land", c(0, 5)).unwrap(); // north of (0,0), wrapped
        grid.place(EntityId(3), "Land", c(0, 0)).unwrap(); // centre
        let without_centre: Vec<EntityId> = grid
            .neighbour_contents(c(0, 0), Adjacency::Orthogonal, false)
            .collect();
        assert_eq!(without_centre.len(), 2);
        assert!(!without_centre.contains(&EntityId(3)));
        let with_centre: Vec<EntityId> = grid
            .neighbour_contents(c(0, 0), Adjacency::Orthogonal, true)
            .collect();
        assert_eq!(with_centre.last(), Some(&EntityId(3)));
    }

    // ── Property tests ──────────────────────────────────────────

    proptest! {
        /// After any sequence of valid place/remove pairs on a Multi
        /// layer, no cell ever holds a duplicate entity.
        #[test]
        fn multi_membership_never_duplicates(
            ops in prop::collection::vec((0u64..8, 0i32..6, 0i32..6), 1..64)
        ) {
            let mut grid = test_grid();
            for (id, x, y) in ops {
                // Ignore the result: re-inserts are no-ops by contract.
                let _ = grid.place(EntityId(id), "Ships", c(x, y));
                let contents: Vec<EntityId> = grid.cell_contents(c(x, y)).collect();
                let mut deduped = contents.clone();
                deduped.dedup();
                prop_assert_eq!(contents, deduped);
            }
        }

        #[test]
        fn relocate_round_trip_is_identity(
            x1 in 0i32..6, y1 in 0i32..6,
            x2 in 0i32..6, y2 in 0i32..6,
        ) {
            let mut grid = test_grid();
            grid.place(EntityId(9), "Ships", c(x1, y1)).unwrap();
            grid.relocate(EntityId(9), "Ships", c(x1, y1), c(x2, y2)).unwrap();
            grid.relocate(EntityId(9), "Ships", c(x2, y2), c(x1, y1)).unwrap();
            prop_assert_eq!(
                grid.cell_contents(c(x1, y1)).collect::<Vec<_>>(),
                vec![EntityId(9)]
            );
            if (x1, y1) != (x2, y2) {
                prop_assert_eq!(grid.cell_contents(c(x2, y2)).count(), 0);
            }
        }
    }
}
