//! The world: assembly, ownership, and the tick loop.

use crate::agent::AgentContext;
use crate::config::{ConfigError, WorldConfig, LAND_LAYER};
use crate::entity::EntityRegistry;
use crate::event::EventLog;
use crate::port::Port;
use crate::settler::Settler;
use crate::ship::Ship;
use crate::worldgen;
use crossbeam_channel::Receiver;
use indexmap::IndexMap;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use skerry_core::{Event, EventKind, TickId};
use skerry_route::SeaLaneTable;
use skerry_space::{DistanceToLandField, GridError, LandMask, LayeredGrid, Torus};
use skerry_weather::WeatherEngine;
use std::error::Error;
use std::fmt;

/// Errors from world construction or ticking.
#[derive(Clone, Debug, PartialEq)]
pub enum WorldError {
    /// The configuration failed validation.
    Config(ConfigError),
    /// A grid operation failed mid-tick: an internal inconsistency; the
    /// caller should treat the whole world as failed.
    Grid(GridError),
}

impl fmt::Display for WorldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "configuration: {err}"),
            Self::Grid(err) => write!(f, "grid: {err}"),
        }
    }
}

impl Error for WorldError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Grid(err) => Some(err),
        }
    }
}

impl From<ConfigError> for WorldError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<GridError> for WorldError {
    fn from(err: GridError) -> Self {
        Self::Grid(err)
    }
}

/// Internal handle for the randomized agent schedule.
enum AgentSlot {
    Ship(usize),
    Settler(usize),
}

/// A fully assembled archipelago world.
///
/// Owns the grid, the weather engine, the sea-lane table, and every
/// agent. All mutation happens through [`tick`](Self::tick), which takes
/// `&mut self`, so callers get compile-time exclusion instead of locks.
/// The single `ChaCha8Rng` seeded from the configuration is the sole
/// source of nondeterminism: two worlds built from equal configurations
/// evolve identically.
pub struct World {
    config: WorldConfig,
    grid: LayeredGrid,
    registry: EntityRegistry,
    land_mask: LandMask,
    weather: WeatherEngine,
    ports: IndexMap<String, Port>,
    lanes: SeaLaneTable,
    ships: Vec<Ship>,
    settlers: Vec<Settler>,
    events: EventLog,
    rng: ChaCha8Rng,
    tick: TickId,
}

impl World {
    /// Build a world from `config`.
    ///
    /// Setup order matters: the land-generation collaborator populates
    /// the Land layer first, then the mask is captured, the weather
    /// engine and distance-to-land field are derived from it, and the
    /// sea lanes are computed last, once ports exist. Routing gaps and
    /// other degraded-world conditions become tick-0 warnings in the
    /// event journal, never construction failures.
    pub fn new(config: WorldConfig) -> Result<Self, WorldError> {
        config.validate()?;
        let torus = Torus::new(config.width, config.height).map_err(ConfigError::Space)?;
        let mut grid = LayeredGrid::new(torus, config.schema.clone());
        let mut registry = EntityRegistry::new();
        let mut events = EventLog::new();
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

        let islands = worldgen::grow_islands(
            &mut grid,
            &mut registry,
            &mut rng,
            config.islands,
            config.land_fraction,
            &mut events,
        );

        let land_mask = LandMask::capture(&grid, LAND_LAYER)?;
        let field = DistanceToLandField::compute(&land_mask);

        let weather = WeatherEngine::new(
            torus,
            config.weather.clone(),
            config.initial_wind_angle,
            &mut rng,
        )
        .map_err(|reason| ConfigError::InvalidWeather { reason })?;

        let mut port_names = worldgen::NamePool::new(config.port_names.clone(), "Port");
        let ports = worldgen::place_ports(
            &mut grid,
            &mut registry,
            &mut rng,
            &islands,
            config.ports_per_island,
            &mut port_names,
            &mut events,
        );

        let sites: Vec<(String, skerry_core::Cell)> = ports
            .values()
            .map(|port| (port.name.clone(), port.position))
            .collect();
        let lanes = SeaLaneTable::build(&land_mask, &field, &sites, config.coast_preference);
        for diagnostic in lanes.diagnostics() {
            events.record(
                TickId(0),
                EventKind::SetupWarning {
                    message: diagnostic.to_string(),
                },
            );
        }
        for port in ports.values() {
            let connected = ports
                .keys()
                .any(|other| lanes.lane(&port.name, other).is_some());
            if !connected && ports.len() > 1 {
                events.record(
                    TickId(0),
                    EventKind::SetupWarning {
                        message: format!("port {} is unreachable from any other port", port.name),
                    },
                );
            }
        }

        let mut ship_names = worldgen::NamePool::new(config.ship_names.clone(), "Ship");
        let ships = worldgen::spawn_ships(
            &mut grid,
            &mut registry,
            &mut rng,
            &ports,
            config.ships,
            &mut ship_names,
            &mut events,
        );

        let mut settler_names = worldgen::NamePool::new(config.settler_names.clone(), "Settler");
        let settlers = worldgen::spawn_settlers(
            &mut grid,
            &mut registry,
            &mut rng,
            &islands,
            config.settlers,
            &mut settler_names,
            &mut events,
        );

        Ok(Self {
            config,
            grid,
            registry,
            land_mask,
            weather,
            ports,
            lanes,
            ships,
            settlers,
            events,
            rng,
            tick: TickId(0),
        })
    }

    /// Advance the world by one tick.
    ///
    /// The weather engine runs its four phases to completion first, then
    /// every agent steps exactly once in a freshly randomized order. A
    /// tick either completes fully or the world should be discarded.
    pub fn tick(&mut self) -> Result<(), WorldError> {
        self.tick = TickId(self.tick.0 + 1);
        self.weather.step(&self.land_mask, &mut self.rng);

        let mut order: Vec<AgentSlot> = (0..self.ships.len())
            .map(AgentSlot::Ship)
            .chain((0..self.settlers.len()).map(AgentSlot::Settler))
            .collect();
        order.shuffle(&mut self.rng);

        for slot in order {
            let mut ctx = AgentContext {
                tick: self.tick,
                grid: &mut self.grid,
                lanes: &self.lanes,
                ports: &self.ports,
                weather: &self.weather,
                rng: &mut self.rng,
                events: &mut self.events,
                departure_probability: self.config.departure_probability,
            };
            match slot {
                AgentSlot::Ship(index) => self.ships[index].step(&mut ctx)?,
                AgentSlot::Settler(index) => self.settlers[index].step(&mut ctx)?,
            }
        }
        Ok(())
    }

    /// Run `ticks` ticks back to back.
    pub fn run(&mut self, ticks: u64) -> Result<(), WorldError> {
        for _ in 0..ticks {
            self.tick()?;
        }
        Ok(())
    }

    /// The tick most recently completed (0 before the first tick).
    pub fn tick_id(&self) -> TickId {
        self.tick
    }

    /// The configuration the world was built from.
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// The shared grid.
    pub fn grid(&self) -> &LayeredGrid {
        &self.grid
    }

    /// The entity registry.
    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    /// The captured land mask.
    pub fn land_mask(&self) -> &LandMask {
        &self.land_mask
    }

    /// The weather engine.
    pub fn weather(&self) -> &WeatherEngine {
        &self.weather
    }

    /// All ports in placement order.
    pub fn ports(&self) -> &IndexMap<String, Port> {
        &self.ports
    }

    /// The precomputed sea-lane table.
    pub fn lanes(&self) -> &SeaLaneTable {
        &self.lanes
    }

    /// All ships.
    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    /// All settlers.
    pub fn settlers(&self) -> &[Settler] {
        &self.settlers
    }

    /// The event journal.
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Open a live event channel for the logging collaborator.
    pub fn subscribe_events(&mut self) -> Receiver<Event> {
        self.events.subscribe()
    }
}

impl fmt::Debug for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("World")
            .field("tick", &self.tick)
            .field("seed", &self.config.seed)
            .field("ports", &self.ports.len())
            .field("ships", &self.ships.len())
            .field("settlers", &self.settlers.len())
            .finish()
    }
}
