//! The navigable-water graph and its shortest-path search.

use skerry_core::Cell;
use skerry_space::{Adjacency, DistanceToLandField, LandMask, Torus};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Sign convention for the distance-to-land edge weights.
///
/// Dijkstra minimizes total weight, so the mapping from distance-to-land
/// to weight decides whether lanes hug the coast or stand out to sea.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CoastPreference {
    /// Weight = distance-to-land: minimized paths stay near coastlines.
    #[default]
    HugCoast,
    /// Weight = (max distance + 1) − distance-to-land: minimized paths
    /// prefer open water.
    OpenWater,
}

/// A weighted graph over navigable cells.
///
/// A node exists for every water cell and for every port cell (even when
/// the port sits on land). Arcs follow toroidal 4-adjacency; an arc is
/// navigable when at least one endpoint is water, which yields
/// water–water and port–water connections but never port–port across
/// land. Traversing an arc costs the weight of its *destination* cell:
/// the distance-to-land mapping for water, a flat 1 for entering a
/// port-on-land. Because the cost of a path between two fixed endpoints
/// then differs from its reverse only by a constant, the minimizing route
/// is the same in both directions and cached lanes may be reversed
/// safely.
pub struct NavGraph {
    torus: Torus,
    water: Vec<bool>,
    port: Vec<bool>,
    /// Cost of entering each cell; `None` for unnavigable cells.
    entry_cost: Vec<Option<u64>>,
}

impl NavGraph {
    /// Build the graph from the land mask, the precomputed
    /// distance-to-land field, and the port positions.
    pub fn build(
        mask: &LandMask,
        field: &DistanceToLandField,
        ports: &[Cell],
        preference: CoastPreference,
    ) -> Self {
        let torus = *mask.torus();
        let cell_count = torus.cell_count();
        let max_distance = field.max_distance() as u64;

        let mut water = vec![false; cell_count];
        let mut port = vec![false; cell_count];
        for cell in torus.cells() {
            water[torus.index_of(cell)] = !mask.is_land(cell);
        }
        for &cell in ports {
            port[torus.index_of(cell)] = true;
        }

        let entry_cost = (0..cell_count)
            .map(|rank| {
                if !water[rank] && !port[rank] {
                    return None;
                }
                if !water[rank] {
                    // A port on land: flat docking cost, independent of
                    // the coast preference.
                    return Some(1);
                }
                let distance = field.distance(torus.cell_at(rank)) as u64;
                Some(match preference {
                    CoastPreference::HugCoast => distance,
                    CoastPreference::OpenWater => max_distance + 1 - distance,
                })
            })
            .collect();

        Self {
            torus,
            water,
            port,
            entry_cost,
        }
    }

    /// Whether `cell` is a node of the graph.
    pub fn is_navigable(&self, cell: Cell) -> bool {
        let rank = self.torus.index_of(cell);
        self.water[rank] || self.port[rank]
    }

    /// Whether the arc `from → to` exists.
    fn arc_allowed(&self, from: usize, to: usize) -> bool {
        let from_node = self.water[from] || self.port[from];
        let to_node = self.water[to] || self.port[to];
        // At least one endpoint must be water: two ports on land never
        // connect directly across the land between them.
        from_node && to_node && (self.water[from] || self.water[to])
    }

    /// Dijkstra from `origin`, returning the shortest path to `target`
    /// inclusive of both endpoints, or `None` if `target` is unreachable.
    pub fn shortest_lane(&self, origin: Cell, target: Cell) -> Option<Vec<Cell>> {
        let origin_rank = self.torus.index_of(origin);
        let target_rank = self.torus.index_of(target);
        if self.entry_cost[origin_rank].is_none() || self.entry_cost[target_rank].is_none() {
            return None;
        }

        let cell_count = self.torus.cell_count();
        let mut best = vec![u64::MAX; cell_count];
        let mut previous = vec![usize::MAX; cell_count];
        let mut heap = BinaryHeap::new();

        best[origin_rank] = 0;
        heap.push(Reverse((0u64, origin_rank)));

        while let Some(Reverse((cost, rank))) = heap.pop() {
            if cost > best[rank] {
                continue; // stale heap entry
            }
            if rank == target_rank {
                break;
            }
            let cell = self.torus.cell_at(rank);
            for neighbour in self.torus.neighbourhood(cell, Adjacency::Orthogonal) {
                let next = self.torus.index_of(neighbour);
                if !self.arc_allowed(rank, next) {
                    continue;
                }
                let Some(step) = self.entry_cost[next] else {
                    continue;
                };
                let candidate = cost + step;
                if candidate < best[next] {
                    best[next] = candidate;
                    previous[next] = rank;
                    heap.push(Reverse((candidate, next)));
                }
            }
        }

        if best[target_rank] == u64::MAX {
            return None;
        }

        let mut path = Vec::new();
        let mut rank = target_rank;
        while rank != origin_rank {
            path.push(self.torus.cell_at(rank));
            rank = previous[rank];
        }
        path.push(self.torus.cell_at(origin_rank));
        path.reverse();
        Some(path)
    }
}
