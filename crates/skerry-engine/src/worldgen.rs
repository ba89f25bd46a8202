//! World generation: island growth, port placement, ships, settlers.
//!
//! This module is the adapter for the land-generation collaborator: a
//! random-frontier expansion that populates the Land layer before the
//! weather engine and the sea-lane router initialize. Display names come
//! from the naming collaborator as opaque strings; the pool synthesizes
//! numbered fallbacks when a list runs short.

use crate::config::{LAND_LAYER, PEOPLE_LAYER, SHIPS_LAYER};
use crate::entity::EntityRegistry;
use crate::event::EventLog;
use crate::port::Port;
use crate::settler::Settler;
use crate::ship::Ship;
use indexmap::IndexMap;
use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use skerry_core::{Cell, EntityKind, EventKind, TickId};
use skerry_space::{Adjacency, LayeredGrid};

/// How many random cells to try when seeding an island.
const SEED_ATTEMPTS: u32 = 128;

/// One island: the tiles it grew, in growth order.
#[derive(Clone, Debug)]
pub struct Island {
    /// Tiles belonging to the island, seed first.
    pub cells: Vec<Cell>,
    /// Parallel flags: a tile is landlocked once every orthogonal
    /// neighbour is occupied, and is skipped by later frontier scans.
    landlocked: Vec<bool>,
}

impl Island {
    fn new(seed: Cell) -> Self {
        Self {
            cells: vec![seed],
            landlocked: vec![false],
        }
    }

    /// Candidate growth cells: empty orthogonal neighbours of every
    /// non-landlocked tile. Duplicates are kept on purpose, so a cell
    /// adjacent to several tiles is proportionally likelier to be chosen.
    fn frontier(&mut self, grid: &LayeredGrid) -> Vec<Cell> {
        let mut candidates = Vec::new();
        for index in 0..self.cells.len() {
            if self.landlocked[index] {
                continue;
            }
            let mut open = false;
            for neighbour in grid
                .torus()
                .neighbourhood(self.cells[index], Adjacency::Orthogonal)
            {
                if !grid.occupied(LAND_LAYER, neighbour).unwrap_or(true) {
                    candidates.push(neighbour);
                    open = true;
                }
            }
            self.landlocked[index] = !open;
        }
        candidates
    }

    /// Tiles with at least one orthogonal water neighbour.
    pub fn coastal_cells(&self, grid: &LayeredGrid) -> Vec<Cell> {
        self.cells
            .iter()
            .copied()
            .filter(|&cell| {
                grid.torus()
                    .neighbourhood(cell, Adjacency::Orthogonal)
                    .into_iter()
                    .any(|neighbour| !grid.occupied(LAND_LAYER, neighbour).unwrap_or(true))
            })
            .collect()
    }
}

/// Seed `island_count` islands and grow them to `land_fraction` of the
/// grid.
///
/// Growth picks a random island each round and expands it into a random
/// frontier cell. An island whose frontier is empty skips its round; a
/// seed that cannot find an empty cell after bounded attempts is dropped
/// with a warning. Both are degraded-world conditions, not errors.
pub fn grow_islands(
    grid: &mut LayeredGrid,
    registry: &mut EntityRegistry,
    rng: &mut ChaCha8Rng,
    island_count: u32,
    land_fraction: f64,
    events: &mut EventLog,
) -> Vec<Island> {
    let torus = *grid.torus();
    let mut islands = Vec::new();

    for _ in 0..island_count {
        let mut seeded = false;
        for _ in 0..SEED_ATTEMPTS {
            let cell = Cell::new(
                rng.gen_range(0..torus.width()) as i32,
                rng.gen_range(0..torus.height()) as i32,
            );
            if grid.occupied(LAND_LAYER, cell).unwrap_or(true) {
                continue;
            }
            let id = registry.allocate(EntityKind::LandTile, LAND_LAYER, None);
            if grid.place(id, LAND_LAYER, cell).is_ok() {
                islands.push(Island::new(cell));
                seeded = true;
                break;
            }
        }
        if !seeded {
            events.record(
                TickId(0),
                EventKind::SetupWarning {
                    message: "no empty cell found for an island seed".to_string(),
                },
            );
        }
    }

    if islands.is_empty() {
        return islands;
    }

    let target = (land_fraction * torus.cell_count() as f64) as usize;
    for _ in 0..target {
        let index = rng.gen_range(0..islands.len());
        let island = &mut islands[index];
        let frontier = island.frontier(grid);
        let Some(&cell) = frontier.choose(rng) else {
            continue; // fully landlocked island; skip this round
        };
        let id = registry.allocate(EntityKind::LandTile, LAND_LAYER, None);
        if grid.place(id, LAND_LAYER, cell).is_ok() {
            island.cells.push(cell);
            island.landlocked.push(false);
        }
    }

    islands
}

/// Draws display names from the collaborator-supplied list, synthesizing
/// `"{prefix} {n}"` once the list runs out.
pub struct NamePool {
    provided: std::vec::IntoIter<String>,
    prefix: &'static str,
    counter: u32,
}

impl NamePool {
    /// Create a pool over `provided`, falling back to `prefix`-numbered
    /// names.
    pub fn new(provided: Vec<String>, prefix: &'static str) -> Self {
        Self {
            provided: provided.into_iter(),
            prefix,
            counter: 0,
        }
    }

    /// The next name.
    pub fn next_name(&mut self) -> String {
        self.counter += 1;
        match self.provided.next() {
            Some(name) => name,
            None => format!("{} {}", self.prefix, self.counter),
        }
    }
}

/// Place `ports_per_island` ports on the coast of each island.
///
/// Port names must be unique (they key the sea-lane table); a duplicate
/// from the naming collaborator is replaced by a synthesized name. An
/// island with too few coastal cells gets what fits, with a warning.
pub fn place_ports(
    grid: &mut LayeredGrid,
    registry: &mut EntityRegistry,
    rng: &mut ChaCha8Rng,
    islands: &[Island],
    ports_per_island: u32,
    names: &mut NamePool,
    events: &mut EventLog,
) -> IndexMap<String, Port> {
    let mut ports = IndexMap::new();
    for island in islands {
        let mut coastal = island.coastal_cells(grid);
        coastal.shuffle(rng);
        if coastal.len() < ports_per_island as usize {
            events.record(
                TickId(0),
                EventKind::SetupWarning {
                    message: format!(
                        "island has only {} coastal cells for {} ports",
                        coastal.len(),
                        ports_per_island
                    ),
                },
            );
        }
        for &cell in coastal.iter().take(ports_per_island as usize) {
            let mut name = names.next_name();
            while ports.contains_key(&name) {
                name = names.next_name();
            }
            let id = registry.allocate(EntityKind::Port, SHIPS_LAYER, Some(name.clone()));
            if grid.place(id, SHIPS_LAYER, cell).is_err() {
                continue;
            }
            ports.insert(
                name.clone(),
                Port {
                    id,
                    name,
                    position: cell,
                },
            );
        }
    }
    ports
}

/// Create `count` ships, each docked at a uniformly chosen port.
pub fn spawn_ships(
    grid: &mut LayeredGrid,
    registry: &mut EntityRegistry,
    rng: &mut ChaCha8Rng,
    ports: &IndexMap<String, Port>,
    count: u32,
    names: &mut NamePool,
    events: &mut EventLog,
) -> Vec<Ship> {
    if ports.is_empty() {
        if count > 0 {
            events.record(
                TickId(0),
                EventKind::SetupWarning {
                    message: "no ports were placed; ships skipped".to_string(),
                },
            );
        }
        return Vec::new();
    }
    let mut ships = Vec::new();
    for _ in 0..count {
        let index = rng.gen_range(0..ports.len());
        let Some((_, port)) = ports.get_index(index) else {
            continue;
        };
        let name = names.next_name();
        let id = registry.allocate(EntityKind::Ship, SHIPS_LAYER, Some(name.clone()));
        let ship = Ship::new(id, name, port);
        if grid.place(id, SHIPS_LAYER, ship.position()).is_ok() {
            ships.push(ship);
        }
    }
    ships
}

/// Create `count` settlers, each on a uniformly chosen island tile.
pub fn spawn_settlers(
    grid: &mut LayeredGrid,
    registry: &mut EntityRegistry,
    rng: &mut ChaCha8Rng,
    islands: &[Island],
    count: u32,
    names: &mut NamePool,
    events: &mut EventLog,
) -> Vec<Settler> {
    if islands.is_empty() {
        if count > 0 {
            events.record(
                TickId(0),
                EventKind::SetupWarning {
                    message: "no islands were grown; settlers skipped".to_string(),
                },
            );
        }
        return Vec::new();
    }
    let mut settlers = Vec::new();
    for _ in 0..count {
        let island_index = rng.gen_range(0..islands.len());
        let Some(&cell) = islands[island_index].cells.choose(rng) else {
            continue;
        };
        let name = names.next_name();
        let id = registry.allocate(EntityKind::Settler, PEOPLE_LAYER, Some(name.clone()));
        let settler = Settler::new(id, name, cell);
        if grid.place(id, PEOPLE_LAYER, cell).is_ok() {
            settlers.push(settler);
        }
    }
    settlers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_schema;
    use rand::SeedableRng;
    use skerry_space::Torus;

    fn setup(width: u32, height: u32, seed: u64) -> (LayeredGrid, EntityRegistry, ChaCha8Rng, EventLog) {
        let torus = Torus::new(width, height).unwrap();
        (
            LayeredGrid::new(torus, default_schema()),
            EntityRegistry::new(),
            ChaCha8Rng::seed_from_u64(seed),
            EventLog::new(),
        )
    }

    #[test]
    fn islands_reach_the_requested_fraction() {
        let (mut grid, mut registry, mut rng, mut events) = setup(20, 20, 1);
        let islands = grow_islands(&mut grid, &mut registry, &mut rng, 2, 0.25, &mut events);
        let land: usize = islands.iter().map(|island| island.cells.len()).sum();
        // Seeds plus the growth budget; frontier-skips can fall short
        // slightly, never overshoot.
        assert!(land <= 100 + 2, "grew too much land: {land}");
        assert!(land > 80, "grew too little land: {land}");
        for island in &islands {
            for &cell in &island.cells {
                assert!(grid.occupied(LAND_LAYER, cell).unwrap());
            }
        }
    }

    #[test]
    fn growth_is_deterministic_per_seed() {
        let run = |seed: u64| {
            let (mut grid, mut registry, mut rng, mut events) = setup(16, 16, seed);
            let islands =
                grow_islands(&mut grid, &mut registry, &mut rng, 3, 0.2, &mut events);
            islands
                .into_iter()
                .map(|island| island.cells)
                .collect::<Vec<_>>()
        };
        assert_eq!(run(9), run(9));
        assert_ne!(run(9), run(10));
    }

    #[test]
    fn ports_sit_on_coastal_land() {
        let (mut grid, mut registry, mut rng, mut events) = setup(20, 20, 4);
        let islands = grow_islands(&mut grid, &mut registry, &mut rng, 1, 0.2, &mut events);
        let mut names = NamePool::new(vec!["Vekka".into(), "Orlen".into()], "Port");
        let ports = place_ports(
            &mut grid,
            &mut registry,
            &mut rng,
            &islands,
            2,
            &mut names,
            &mut events,
        );
        assert_eq!(ports.len(), 2);
        assert!(ports.contains_key("Vekka"));
        for port in ports.values() {
            assert!(grid.occupied(LAND_LAYER, port.position).unwrap());
            let has_water = grid
                .torus()
                .neighbourhood(port.position, Adjacency::Orthogonal)
                .into_iter()
                .any(|cell| !grid.occupied(LAND_LAYER, cell).unwrap());
            assert!(has_water, "port at {} is landlocked", port.position);
        }
    }

    #[test]
    fn name_pool_falls_back_to_numbered_names() {
        let mut pool = NamePool::new(vec!["Gull".into()], "Ship");
        assert_eq!(pool.next_name(), "Gull");
        assert_eq!(pool.next_name(), "Ship 2");
        assert_eq!(pool.next_name(), "Ship 3");
    }

    #[test]
    fn ships_without_ports_warn_and_skip() {
        let (mut grid, mut registry, mut rng, mut events) = setup(8, 8, 4);
        let ports = IndexMap::new();
        let mut names = NamePool::new(Vec::new(), "Ship");
        let ships = spawn_ships(
            &mut grid,
            &mut registry,
            &mut rng,
            &ports,
            3,
            &mut names,
            &mut events,
        );
        assert!(ships.is_empty());
        assert_eq!(events.events().len(), 1);
    }
}
