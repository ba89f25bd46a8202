//! The cached sea-lane table.

use crate::graph::{CoastPreference, NavGraph};
use indexmap::IndexMap;
use skerry_core::Cell;
use skerry_space::{DistanceToLandField, LandMask};
use std::fmt;

/// A port pair with no navigable connection.
///
/// Emitted once per unordered pair during table construction; the pair is
/// simply omitted from the table and the rest of the computation
/// continues.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LaneDiagnostic {
    /// One endpoint of the unconnected pair.
    pub origin: String,
    /// The other endpoint.
    pub destination: String,
}

impl fmt::Display for LaneDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no navigable route between {} and {}",
            self.origin, self.destination
        )
    }
}

/// Precomputed shortest lanes between every connected pair of ports.
///
/// Keys are ordered `(origin, destination)` name pairs; each lane is the
/// full coordinate sequence inclusive of both endpoints. Built once after
/// ports exist and read-only afterward. A missing key means "no route".
pub struct SeaLaneTable {
    lanes: IndexMap<(String, String), Vec<Cell>>,
    diagnostics: Vec<LaneDiagnostic>,
}

impl SeaLaneTable {
    /// Compute lanes for every unordered pair of distinct ports.
    ///
    /// One Dijkstra run per unordered pair; the reverse lane is stored by
    /// reversing the forward one, which is valid because the minimizing
    /// route between two fixed endpoints is direction-independent (see
    /// [`NavGraph`]).
    pub fn build(
        mask: &LandMask,
        field: &DistanceToLandField,
        ports: &[(String, Cell)],
        preference: CoastPreference,
    ) -> Self {
        let positions: Vec<Cell> = ports.iter().map(|(_, cell)| *cell).collect();
        let graph = NavGraph::build(mask, field, &positions, preference);

        let mut lanes = IndexMap::new();
        let mut diagnostics = Vec::new();
        for (i, (origin_name, origin_cell)) in ports.iter().enumerate() {
            for (destination_name, destination_cell) in ports.iter().skip(i + 1) {
                match graph.shortest_lane(*origin_cell, *destination_cell) {
                    Some(lane) => {
                        let mut reversed = lane.clone();
                        reversed.reverse();
                        lanes.insert(
                            (origin_name.clone(), destination_name.clone()),
                            lane,
                        );
                        lanes.insert(
                            (destination_name.clone(), origin_name.clone()),
                            reversed,
                        );
                    }
                    None => diagnostics.push(LaneDiagnostic {
                        origin: origin_name.clone(),
                        destination: destination_name.clone(),
                    }),
                }
            }
        }

        Self { lanes, diagnostics }
    }

    /// The lane from `origin` to `destination`, if one exists.
    pub fn lane(&self, origin: &str, destination: &str) -> Option<&[Cell]> {
        self.lanes
            .get(&(origin.to_string(), destination.to_string()))
            .map(|lane| lane.as_slice())
    }

    /// Every pair that could not be connected.
    pub fn diagnostics(&self) -> &[LaneDiagnostic] {
        &self.diagnostics
    }

    /// Number of ordered lane entries.
    pub fn len(&self) -> usize {
        self.lanes.len()
    }

    /// Whether no lanes were computed at all.
    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }

    /// Iterate `(origin, destination, lane)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &[Cell])> + '_ {
        self.lanes
            .iter()
            .map(|((origin, destination), lane)| {
                (origin.as_str(), destination.as_str(), lane.as_slice())
            })
    }
}
